//! Port abstraction for calculation persistence adapters and their errors.
//!
//! The repository stores already-evaluated records: callers pass the draft
//! together with the engine's result, so a record whose result disagrees
//! with its operands can never be constructed through this port.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationDraft, CalculationId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by calculation repository adapters.
    pub enum CalculationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "calculation repository query failed: {message}",
    }
}

/// Driven port for calculation record storage.
///
/// Absence is reported in-band (`Option`/`bool`) rather than as an error so
/// the service layer owns the `NotFound` policy.
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Persist a new record with a fresh identifier and the computed result.
    async fn insert(
        &self,
        draft: &CalculationDraft,
        result: f64,
    ) -> Result<Calculation, CalculationPersistenceError>;

    /// Return all currently persisted records.
    async fn list(&self) -> Result<Vec<Calculation>, CalculationPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError>;

    /// Overwrite operands, kind, and result in place, keeping the identifier.
    ///
    /// Returns `None` when no record with `id` exists.
    async fn update(
        &self,
        id: CalculationId,
        draft: &CalculationDraft,
        result: f64,
    ) -> Result<Option<Calculation>, CalculationPersistenceError>;

    /// Remove a record permanently. Returns `false` when it was absent.
    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationPersistenceError>;
}

#[derive(Debug, Default)]
struct InMemoryCalculationState {
    records: BTreeMap<CalculationId, Calculation>,
    next_id: i32,
}

/// In-memory calculation repository for tests and database-less runs.
///
/// Identifiers come from a monotonic counter and are never reused after
/// deletion, matching the behaviour of the SQL sequence in production.
#[derive(Debug, Default)]
pub struct InMemoryCalculationRepository {
    state: Mutex<InMemoryCalculationState>,
}

impl InMemoryCalculationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculationRepository for InMemoryCalculationRepository {
    async fn insert(
        &self,
        draft: &CalculationDraft,
        result: f64,
    ) -> Result<Calculation, CalculationPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CalculationPersistenceError::query("state lock poisoned"))?;
        state.next_id += 1;
        let id = CalculationId::new(state.next_id);
        let record = Calculation::from_draft(id, draft, result);
        state.records.insert(id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Calculation>, CalculationPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CalculationPersistenceError::query("state lock poisoned"))?;
        Ok(state.records.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CalculationPersistenceError::query("state lock poisoned"))?;
        Ok(state.records.get(&id).cloned())
    }

    async fn update(
        &self,
        id: CalculationId,
        draft: &CalculationDraft,
        result: f64,
    ) -> Result<Option<Calculation>, CalculationPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CalculationPersistenceError::query("state lock poisoned"))?;
        if !state.records.contains_key(&id) {
            return Ok(None);
        }
        let record = Calculation::from_draft(id, draft, result);
        state.records.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CalculationPersistenceError::query("state lock poisoned"))?;
        Ok(state.records.remove(&id).is_some())
    }
}
