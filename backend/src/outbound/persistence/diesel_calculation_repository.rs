//! PostgreSQL-backed `CalculationRepository` implementation using Diesel.
//!
//! A thin adapter: it translates between Diesel rows and domain records and
//! maps database failures onto the port's error type. No business logic
//! lives here; results arrive pre-computed from the service layer.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CalculationPersistenceError, CalculationRepository};
use crate::domain::{Calculation, CalculationDraft, CalculationId, Operation};

use super::models::{CalculationChangeset, CalculationRow, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Diesel-backed implementation of the `CalculationRepository` port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CalculationPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CalculationPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CalculationPersistenceError::connection("database connection error")
        }
        _ => CalculationPersistenceError::query("database error"),
    }
}

fn row_to_calculation(row: CalculationRow) -> Result<Calculation, CalculationPersistenceError> {
    // Stored values are written from `Operation::as_str`, so a parse failure
    // here means the table was modified out of band.
    let operation = Operation::parse(&row.operation).map_err(|_| {
        CalculationPersistenceError::query(format!(
            "corrupt operation value in row {}: {}",
            row.id, row.operation
        ))
    })?;
    Ok(Calculation {
        id: CalculationId::new(row.id),
        a: row.a,
        b: row.b,
        operation,
        result: row.result,
    })
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn insert(
        &self,
        draft: &CalculationDraft,
        result: f64,
    ) -> Result<Calculation, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCalculationRow {
            a: draft.a,
            b: draft.b,
            operation: draft.operation.as_str(),
            result,
        };
        let inserted: CalculationRow = diesel::insert_into(calculations::table)
            .values(&row)
            .returning(CalculationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_calculation(inserted)
    }

    async fn list(&self) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CalculationRow> = calculations::table
            .select(CalculationRow::as_select())
            .order(calculations::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_calculation).collect()
    }

    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CalculationRow> = calculations::table
            .filter(calculations::id.eq(id.get()))
            .select(CalculationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_calculation).transpose()
    }

    async fn update(
        &self,
        id: CalculationId,
        draft: &CalculationDraft,
        result: f64,
    ) -> Result<Option<Calculation>, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = CalculationChangeset {
            a: draft.a,
            b: draft.b,
            operation: draft.operation.as_str(),
            result,
        };
        let row: Option<CalculationRow> =
            diesel::update(calculations::table.filter(calculations::id.eq(id.get())))
                .set(&changeset)
                .returning(CalculationRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        row.map(row_to_calculation).transpose()
    }

    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(calculations::table.filter(calculations::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
