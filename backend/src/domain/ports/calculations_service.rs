//! Driving port for calculation use-cases.
//!
//! In hexagonal terms this is a *driving* port: the HTTP adapter calls it to
//! run the BREAD operations without knowing the backing repository. Handler
//! tests substitute a deterministic implementation instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationDraft, CalculationId, Error};

/// Domain use-case port for the calculation BREAD operations.
#[async_trait]
pub trait CalculationsService: Send + Sync {
    /// Evaluate the draft and persist a new record with the result.
    async fn create(&self, draft: CalculationDraft) -> Result<Calculation, Error>;

    /// Return all persisted records.
    async fn list(&self) -> Result<Vec<Calculation>, Error>;

    /// Return the record with `id` or a `NotFound` error.
    async fn fetch(&self, id: CalculationId) -> Result<Calculation, Error>;

    /// Re-evaluate and overwrite the record in place, keeping its identifier.
    async fn update(&self, id: CalculationId, draft: CalculationDraft)
    -> Result<Calculation, Error>;

    /// Remove the record permanently.
    async fn delete(&self, id: CalculationId) -> Result<(), Error>;
}
