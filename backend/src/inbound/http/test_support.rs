//! Test helpers for inbound HTTP components.
//!
//! Builds use-case services over the in-memory repositories so handler
//! tests run deterministically and without Argon2's deliberate slowness.

use std::sync::Arc;

use crate::domain::ports::{
    InMemoryCalculationRepository, InMemoryUserRepository, PasswordHashError, PasswordHasher,
    UsersService,
};
use crate::domain::{CalculationServiceImpl, PasswordHash, UserServiceImpl};
use crate::inbound::http::state::HttpState;

/// Deterministic, fast hasher for handler tests.
struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("hashed:{plaintext}")))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str() == format!("hashed:{plaintext}"))
    }
}

/// Users service over an empty in-memory repository.
pub fn test_users_service() -> Arc<dyn UsersService> {
    Arc::new(UserServiceImpl::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(PrefixHasher),
    ))
}

/// Full handler state over empty in-memory repositories.
pub fn test_http_state() -> HttpState {
    let calculations = Arc::new(CalculationServiceImpl::new(Arc::new(
        InMemoryCalculationRepository::new(),
    )));
    HttpState::new(calculations, test_users_service())
}
