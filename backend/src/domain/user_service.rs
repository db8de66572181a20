//! Production implementation of the users use-case port.
//!
//! Registration derives the password hash through the hashing port before
//! touching storage; login collapses every credential failure into one
//! `InvalidCredentials` outcome so callers cannot probe which usernames
//! exist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    NewUser, PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository, UsersService,
};
use crate::domain::{Error, LoginCredentials, Registration, UserView};

/// Repository-backed [`UsersService`] implementation.
#[derive(Clone)]
pub struct UserServiceImpl {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserServiceImpl {
    /// Create a service backed by the given repository and hashing adapter.
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::Duplicate { .. } => {
            Error::duplicate_user("username or email already exists")
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    let PasswordHashError::Hash { message } = error;
    Error::internal(message)
}

fn invalid_credentials() -> Error {
    Error::invalid_credentials("invalid username or password")
}

#[async_trait]
impl UsersService for UserServiceImpl {
    async fn register(&self, registration: Registration) -> Result<UserView, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;

        let new_user = NewUser {
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
        };

        let user = self
            .repository
            .insert(&new_user)
            .await
            .map_err(map_persistence_error)?;
        debug!(id = %user.id(), username = %user.username(), "user registered");
        Ok(user.to_view())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<UserView, Error> {
        let user = self
            .repository
            .find_by_username(credentials.username())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(invalid_credentials)?;

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hash_error)?;
        if !matches {
            return Err(invalid_credentials());
        }
        Ok(user.to_view())
    }
}

#[cfg(test)]
mod tests {
    //! Registration and login behaviour against the in-memory repository.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::PasswordHash;
    use crate::domain::ports::InMemoryUserRepository;

    /// Deterministic hasher for tests: prefixes the plaintext.
    struct StubHasher;

    impl PasswordHasher for StubHasher {
        fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
            Ok(PasswordHash::new(format!("hashed:{plaintext}")))
        }

        fn verify(
            &self,
            plaintext: &str,
            hash: &PasswordHash,
        ) -> Result<bool, PasswordHashError> {
            Ok(hash.as_str() == format!("hashed:{plaintext}"))
        }
    }

    fn service() -> UserServiceImpl {
        UserServiceImpl::new(Arc::new(InMemoryUserRepository::new()), Arc::new(StubHasher))
    }

    fn registration(username: &str, email: &str, password: &str) -> Registration {
        Registration::try_from_parts(username, email, password).expect("valid registration")
    }

    #[tokio::test]
    async fn register_returns_a_view_without_password_material() {
        let service = service();
        let view = service
            .register(registration("u2", "u2@x.com", "secret1"))
            .await
            .expect("register");
        assert_eq!(view.username.as_ref(), "u2");
        assert_eq!(view.email.as_ref(), "u2@x.com");
    }

    #[tokio::test]
    async fn duplicate_username_fails_even_with_a_fresh_email() {
        let service = service();
        service
            .register(registration("u1", "u1@x.com", "pw123456"))
            .await
            .expect("first registration");

        let error = service
            .register(registration("u1", "other@x.com", "pw"))
            .await
            .expect_err("must clash");
        assert_eq!(error.code(), ErrorCode::DuplicateUser);
    }

    #[tokio::test]
    async fn duplicate_email_fails_even_with_a_fresh_username() {
        let service = service();
        service
            .register(registration("u1", "u1@x.com", "pw123456"))
            .await
            .expect("first registration");

        let error = service
            .register(registration("someone-else", "u1@x.com", "pw"))
            .await
            .expect_err("must clash");
        assert_eq!(error.code(), ErrorCode::DuplicateUser);
    }

    #[tokio::test]
    async fn login_succeeds_with_the_registered_password() {
        let service = service();
        service
            .register(registration("u2", "u2@x.com", "secret1"))
            .await
            .expect("register");

        let creds = LoginCredentials::try_from_parts("u2", "secret1").expect("creds");
        let view = service.login(creds).await.expect("login");
        assert_eq!(view.username.as_ref(), "u2");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let service = service();
        service
            .register(registration("u2", "u2@x.com", "secret1"))
            .await
            .expect("register");

        let wrong_password = service
            .login(LoginCredentials::try_from_parts("u2", "wrong").expect("creds"))
            .await
            .expect_err("wrong password");
        let unknown_user = service
            .login(LoginCredentials::try_from_parts("nobody", "secret1").expect("creds"))
            .await
            .expect_err("unknown user");

        assert_eq!(wrong_password.code(), ErrorCode::InvalidCredentials);
        assert_eq!(unknown_user, wrong_password);
    }
}
