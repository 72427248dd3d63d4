// Accounts: bcrypt password hashing, HS256 session tokens, and the bearer
// extractors that resolve who is calling.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;
