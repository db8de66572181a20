//! Driving port for user registration and login use-cases.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, UserView};

/// Domain use-case port for registration and credential verification.
///
/// Both operations return [`UserView`] projections; the persisted record and
/// its password hash never cross this port outward.
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new user, hashing the password before persistence.
    async fn register(&self, registration: Registration) -> Result<UserView, Error>;

    /// Verify credentials, collapsing unknown-user and wrong-password into
    /// one indistinguishable `InvalidCredentials` outcome.
    async fn login(&self, credentials: LoginCredentials) -> Result<UserView, Error>;
}
