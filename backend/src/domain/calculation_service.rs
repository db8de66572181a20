//! Production implementation of the calculation use-case port.
//!
//! Orchestrates the pure engine and the repository: the engine always runs
//! first, so a failed evaluation can never persist or mutate a record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CalculationPersistenceError, CalculationRepository, CalculationsService,
};
use crate::domain::{Calculation, CalculationDraft, CalculationId, Error};

/// Repository-backed [`CalculationsService`] implementation.
#[derive(Clone)]
pub struct CalculationServiceImpl {
    repository: Arc<dyn CalculationRepository>,
}

impl CalculationServiceImpl {
    /// Create a service backed by the given repository.
    pub fn new(repository: Arc<dyn CalculationRepository>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: CalculationPersistenceError) -> Error {
    match error {
        CalculationPersistenceError::Connection { message } => Error::service_unavailable(message),
        CalculationPersistenceError::Query { message } => Error::internal(message),
    }
}

fn not_found(id: CalculationId) -> Error {
    Error::not_found(format!("calculation {id} not found"))
}

#[async_trait]
impl CalculationsService for CalculationServiceImpl {
    async fn create(&self, draft: CalculationDraft) -> Result<Calculation, Error> {
        let result = draft.evaluate()?;
        let record = self
            .repository
            .insert(&draft, result)
            .await
            .map_err(map_persistence_error)?;
        debug!(id = %record.id, operation = %record.operation, "calculation created");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Calculation>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn fetch(&self, id: CalculationId) -> Result<Calculation, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn update(
        &self,
        id: CalculationId,
        draft: CalculationDraft,
    ) -> Result<Calculation, Error> {
        // Evaluate before touching storage so an engine failure leaves the
        // existing record unmodified.
        let result = draft.evaluate()?;
        self.repository
            .update(id, &draft, result)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: CalculationId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if removed {
            debug!(%id, "calculation deleted");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour coverage against the in-memory repository.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::Operation;
    use crate::domain::ports::InMemoryCalculationRepository;
    use rstest::rstest;

    fn service() -> CalculationServiceImpl {
        CalculationServiceImpl::new(Arc::new(InMemoryCalculationRepository::new()))
    }

    #[rstest]
    #[case(10.0, 5.0, Operation::Add, 15.0)]
    #[case(8.0, 2.0, Operation::Divide, 4.0)]
    #[case(10.0, 2.0, Operation::Sub, 8.0)]
    #[tokio::test]
    async fn create_stores_the_engine_result(
        #[case] a: f64,
        #[case] b: f64,
        #[case] operation: Operation,
        #[case] expected: f64,
    ) {
        let service = service();
        let record = service
            .create(CalculationDraft::new(a, b, operation))
            .await
            .expect("create");
        assert_eq!(record.result, expected);

        let fetched = service.fetch(record.id).await.expect("fetch");
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn create_with_zero_divisor_persists_nothing() {
        let service = service();
        let error = service
            .create(CalculationDraft::new(10.0, 0.0, Operation::Divide))
            .await
            .expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::DivisionByZero);
        assert!(service.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn update_recomputes_and_keeps_the_identifier() {
        let service = service();
        let created = service
            .create(CalculationDraft::new(5.0, 3.0, Operation::Add))
            .await
            .expect("create");

        let updated = service
            .update(created.id, CalculationDraft::new(10.0, 2.0, Operation::Sub))
            .await
            .expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.operation, Operation::Sub);
        assert_eq!(updated.result, 8.0);
    }

    #[tokio::test]
    async fn failed_update_leaves_the_record_unmodified() {
        let service = service();
        let created = service
            .create(CalculationDraft::new(5.0, 3.0, Operation::Add))
            .await
            .expect("create");

        let error = service
            .update(created.id, CalculationDraft::new(1.0, 0.0, Operation::Divide))
            .await
            .expect_err("must fail");
        assert_eq!(error.code(), ErrorCode::DivisionByZero);

        let fetched = service.fetch(created.id).await.expect("fetch");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn operations_on_missing_records_signal_not_found() {
        let service = service();
        let missing = CalculationId::new(99_999);

        let fetch_err = service.fetch(missing).await.expect_err("fetch");
        assert_eq!(fetch_err.code(), ErrorCode::NotFound);

        let update_err = service
            .update(missing, CalculationDraft::new(1.0, 1.0, Operation::Add))
            .await
            .expect_err("update");
        assert_eq!(update_err.code(), ErrorCode::NotFound);

        let delete_err = service.delete(missing).await.expect_err("delete");
        assert_eq!(delete_err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn fetch_after_delete_signals_not_found() {
        let service = service();
        let created = service
            .create(CalculationDraft::new(7.0, 3.0, Operation::Multiply))
            .await
            .expect("create");

        service.delete(created.id).await.expect("delete");
        let error = service.fetch(created.id).await.expect_err("fetch");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
