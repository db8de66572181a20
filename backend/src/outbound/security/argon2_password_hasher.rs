//! Argon2id implementation of the password hashing port.
//!
//! Hashes are produced in PHC string form with a fresh random salt per
//! registration, so the stored verifier is self-describing and parameters
//! can be upgraded without a schema change.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id adapter for the [`PasswordHasher`] port with default parameters.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create an adapter using the library's default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::hash(e.to_string()))?;
        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed =
            PhcHash::new(hash.as_str()).map_err(|e| PasswordHashError::hash(e.to_string()))?;
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::hash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Hash shape and verification coverage.
    use super::*;

    #[test]
    fn derived_hashes_verify_and_mismatches_do_not() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret1").expect("hash");

        assert!(hasher.verify("secret1", &hash).expect("verify"));
        assert!(!hasher.verify("wrong", &hash).expect("verify"));
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("secret1").expect("hash");
        let second = hasher.hash("secret1").expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn corrupt_stored_hashes_are_errors_not_mismatches() {
        let hasher = Argon2PasswordHasher::new();
        let corrupt = PasswordHash::new("not-a-phc-string");
        assert!(hasher.verify("secret1", &corrupt).is_err());
    }
}
