//! Port abstraction for user persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Email, PasswordHash, User, UserId, Username};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint on username or email was violated.
        ///
        /// Raised by the store's own constraint enforcement, which is also
        /// what serialises concurrent registrations: exactly one wins.
        Duplicate { message: String } => "user already exists: {message}",
    }
}

/// Validated insert payload for a new user record.
///
/// Carries the already-derived hash; plaintext passwords never cross this
/// port.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Requested unique account name.
    pub username: Username,
    /// Requested unique email address.
    pub email: Email,
    /// Password verifier derived by the hashing port.
    pub password_hash: PasswordHash,
}

/// Driven port for user record storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new record with a fresh identifier.
    ///
    /// Fails with [`UserPersistenceError::Duplicate`] when the username or
    /// email is already taken.
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError>;
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: Vec<User>,
    next_id: i32,
}

/// In-memory user repository for tests and database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryUserState>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query("state lock poisoned"))?;

        let clash = state.users.iter().any(|user| {
            user.username() == &new_user.username || user.email() == &new_user.email
        });
        if clash {
            return Err(UserPersistenceError::duplicate(
                "username or email already exists",
            ));
        }

        state.next_id += 1;
        let user = User::new(
            UserId::new(state.next_id),
            new_user.username.clone(),
            new_user.email.clone(),
            new_user.password_hash.clone(),
        );
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query("state lock poisoned"))?;
        Ok(state
            .users
            .iter()
            .find(|user| user.username().as_ref() == username)
            .cloned())
    }
}
