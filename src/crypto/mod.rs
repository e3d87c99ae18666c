//! Credential primitives for fintrack
//!
//! Argon2id password hashing, random session tokens, and a zeroizing string
//! for plain-text passwords in transit.

pub mod password;
pub mod secure_memory;
pub mod token;

pub use password::{hash_password, validate_password, verify_password};
pub use secure_memory::SecureString;
pub use token::generate_token;
