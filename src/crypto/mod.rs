//! Credential handling for EasyFinance
//!
//! Argon2id password hashing and a zeroizing string for plaintext passwords.

pub mod password;
pub mod secure_memory;

pub use password::{hash_password, verify_password, HashParams};
pub use secure_memory::SecureString;
