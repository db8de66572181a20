//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; business rules stay in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak out of this module.
//! - **Strongly typed errors**: database failures are mapped onto the port
//!   error types, with unique violations becoming `Duplicate`.

mod diesel_calculation_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_calculation_repository::DieselCalculationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// SQL migrations compiled into the binary from `backend/migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Failures raised while applying pending migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("failed to connect for migrations: {0}")]
    Connection(String),
    /// A migration failed to apply.
    #[error("failed to run migrations: {0}")]
    Apply(String),
}

/// Apply all pending migrations over a blocking connection.
///
/// Migrations use Diesel's synchronous harness, so this runs on the
/// blocking thread pool rather than the async runtime.
///
/// # Errors
/// Returns [`MigrationError`] when connecting or applying fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|e| MigrationError::Connection(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|e| MigrationError::Apply(e.to_string()))
    })
    .await
    .map_err(|e| MigrationError::Apply(e.to_string()))??;

    info!(applied, "database migrations up to date");
    Ok(())
}
