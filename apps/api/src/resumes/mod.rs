pub mod handlers;
pub mod preview;
