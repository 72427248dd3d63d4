pub mod generated;
pub mod resume;
pub mod user;
