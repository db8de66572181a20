//! Domain primitives, the calculation engine, and use-case services.
//!
//! Purpose: keep every business rule transport- and storage-agnostic. The
//! inbound HTTP adapter and the outbound persistence adapters only touch
//! this layer through the types re-exported here and the traits in
//! [`ports`].

pub mod calculation;
mod calculation_service;
pub mod error;
pub mod ports;
pub mod user;
mod user_service;

pub use self::calculation::{Calculation, CalculationDraft, CalculationId, Operation, evaluate};
pub use self::calculation_service::CalculationServiceImpl;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{
    Email, LoginCredentials, PasswordHash, Registration, User, UserId, UserValidationError,
    UserView, Username,
};
pub use self::user_service::UserServiceImpl;

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
