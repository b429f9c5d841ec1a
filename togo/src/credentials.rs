//! Password hashing for the login command.
//!
//! The identity ledger only ever stores and compares hashes; plaintext
//! passwords stay on the CLI side and are wiped once hashed.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Hashes `password` to lowercase hex SHA-256 and wipes the plaintext.
///
/// # Example
///
/// ```
/// use togo::credentials::hash_password;
///
/// let hash = hash_password(String::from("123456"));
/// assert_eq!(hash.len(), 64);
/// ```
#[must_use]
pub fn hash_password(mut password: String) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    password.zeroize();
    hex::encode(hasher.finalize())
}
