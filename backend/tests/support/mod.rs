//! Shared fixtures for the API integration tests.

use std::sync::Arc;

use backend::domain::UserServiceImpl;
use backend::domain::ports::{InMemoryUserRepository, UsersService};
use backend::outbound::security::Argon2PasswordHasher;

/// Users service over the in-memory repository with real Argon2id hashing.
pub fn users_service_with_argon2() -> Arc<dyn UsersService> {
    Arc::new(UserServiceImpl::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    ))
}
