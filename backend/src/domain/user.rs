//! User identity model.
//!
//! The persisted [`User`] record carries the password hash and is never
//! serialized. External surfaces only ever see the [`UserView`] projection,
//! which structurally cannot contain password material.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised while constructing user components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    InvalidEmail,
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier assigned by the record store on creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw identifier value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;

/// Unique account name chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only: one @, a dotted domain, no whitespace. Full RFC
        // validation is the mail system's problem, not this application's.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address validated against a permissive shape check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// One-way derived password verifier in PHC string form.
///
/// Deliberately implements neither `Serialize` nor `Display`, and redacts
/// its `Debug` output, so the hash cannot leak through logging or response
/// serialization by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-derived hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Access the PHC-formatted hash string for verification.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Persisted user record, exclusively owned by the user record store.
///
/// ## Invariants
/// - `username` and `email` are unique across all live records, enforced by
///   the store's uniqueness constraints at creation time.
/// - `password_hash` is never stored or returned in plaintext form.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: PasswordHash,
}

impl User {
    /// Build a record from validated components.
    pub fn new(id: UserId, username: Username, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Unique email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored password verifier.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Project this record into its external-facing view.
    pub fn to_view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// External-facing projection of a [`User`] with password material excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    /// Stable user identifier.
    #[schema(value_type = i32, example = 1)]
    pub id: UserId,
    /// Unique account name.
    #[schema(value_type = String, example = "ada")]
    pub username: Username,
    /// Unique email address.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: Email,
}

/// Validated inputs for registering a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    username: Username,
    email: Email,
    password: String,
}

impl Registration {
    /// Validate and assemble a registration from boundary strings.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            username: Username::new(username)?,
            email: Email::new(email)?,
            password: password.to_owned(),
        })
    }

    /// Requested account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password; hashed by the service, never persisted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated inputs for a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Validate and assemble credentials from boundary strings.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, UserValidationError> {
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Account name supplied by the caller.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Validation and projection coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("u1@x.com")]
    #[case("ada.lovelace@example.co.uk")]
    #[case("a+tag@b.io")]
    fn email_accepts_plausible_addresses(#[case] input: &str) {
        assert!(Email::new(input).is_ok());
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("missing@domain")]
    #[case("two@@at.com")]
    #[case("spaces in@x.com")]
    #[case("")]
    fn email_rejects_malformed_addresses(#[case] input: &str) {
        assert_eq!(Email::new(input), Err(UserValidationError::InvalidEmail));
    }

    #[test]
    fn username_rejects_blank_input() {
        assert_eq!(
            Username::new("   "),
            Err(UserValidationError::EmptyUsername)
        );
    }

    #[test]
    fn username_rejects_oversized_input() {
        let long = "x".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(long),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[test]
    fn view_excludes_password_material() {
        let user = User::new(
            UserId::new(1),
            Username::new("ada").expect("valid username"),
            Email::new("ada@example.com").expect("valid email"),
            PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$abc$def"),
        );

        let value = serde_json::to_value(user.to_view()).expect("serialize view");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("username"));
        assert!(object.contains_key("email"));
    }

    #[test]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }

    #[test]
    fn registration_rejects_empty_password() {
        assert_eq!(
            Registration::try_from_parts("ada", "ada@example.com", ""),
            Err(UserValidationError::EmptyPassword)
        );
    }
}
