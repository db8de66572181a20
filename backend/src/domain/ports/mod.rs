//! Domain ports: the seams between use-cases and adapters.
//!
//! Driving ports ([`CalculationsService`], [`UsersService`]) are called by
//! inbound adapters; driven ports ([`CalculationRepository`],
//! [`UserRepository`], [`PasswordHasher`]) are implemented by outbound
//! adapters. In-memory repository implementations live alongside the traits
//! so tests and database-less runs share one deterministic substitute.

mod calculation_repository;
mod calculations_service;
pub(crate) mod macros;
mod password_hasher;
mod user_repository;
mod users_service;

pub use calculation_repository::{
    CalculationPersistenceError, CalculationRepository, InMemoryCalculationRepository,
};
pub use calculations_service::CalculationsService;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use user_repository::{InMemoryUserRepository, NewUser, UserPersistenceError, UserRepository};
pub use users_service::UsersService;
