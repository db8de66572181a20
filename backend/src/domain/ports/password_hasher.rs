//! Port abstraction for password hashing.
//!
//! The domain only ever sees an opaque [`PasswordHash`]; which algorithm
//! derives it is an adapter decision. Hashing is CPU work with no I/O, so
//! the port is synchronous.

use crate::domain::PasswordHash;

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Deriving or parsing a hash failed.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Driven port for deriving and verifying password hashes.
pub trait PasswordHasher: Send + Sync {
    /// Derive a one-way hash from a plaintext password.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; `Err` is reserved for corrupt hashes and
    /// adapter failures.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
