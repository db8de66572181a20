//! Calculation BREAD endpoints.
//!
//! ```text
//! POST   /calculations        {"a":10,"b":5,"type":"Add"}
//! GET    /calculations
//! GET    /calculations/{id}
//! PUT    /calculations/{id}   {"a":10,"b":2,"type":"Sub"}
//! DELETE /calculations/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Calculation, CalculationDraft, CalculationId, Error, Operation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body shared by create and edit.
///
/// The operation kind arrives as a plain string so unknown spellings map to
/// the domain's `InvalidOperation` error instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CalculationRequest {
    /// Operand A.
    pub a: f64,
    /// Operand B.
    pub b: f64,
    /// Operation kind: `Add`, `Subtract`/`Sub`, `Multiply`, or `Divide`.
    #[serde(rename = "type")]
    #[schema(example = "Add")]
    pub kind: String,
}

impl TryFrom<CalculationRequest> for CalculationDraft {
    type Error = Error;

    fn try_from(value: CalculationRequest) -> Result<Self, Self::Error> {
        let operation = Operation::parse(&value.kind)?;
        Ok(Self::new(value.a, value.b, operation))
    }
}

/// Confirmation body returned by the delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    /// Human-readable confirmation.
    #[schema(example = "calculation 1 deleted")]
    pub message: String,
}

/// Create a calculation, computing and storing its result.
#[utoipa::path(
    post,
    path = "/calculations",
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Created record", body = Calculation),
        (status = 400, description = "Division by zero or unknown operation", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "createCalculation"
)]
#[post("/calculations")]
pub async fn create_calculation(
    state: web::Data<HttpState>,
    payload: web::Json<CalculationRequest>,
) -> ApiResult<web::Json<Calculation>> {
    let draft = CalculationDraft::try_from(payload.into_inner())?;
    let record = state.calculations.create(draft).await?;
    Ok(web::Json(record))
}

/// Browse all persisted calculations.
#[utoipa::path(
    get,
    path = "/calculations",
    responses(
        (status = 200, description = "All records", body = [Calculation]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "listCalculations"
)]
#[get("/calculations")]
pub async fn list_calculations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Calculation>>> {
    let records = state.calculations.list().await?;
    Ok(web::Json(records))
}

/// Read a single calculation by identifier.
#[utoipa::path(
    get,
    path = "/calculations/{id}",
    params(("id" = i32, Path, description = "Calculation identifier")),
    responses(
        (status = 200, description = "The record", body = Calculation),
        (status = 404, description = "No record with that identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "getCalculation"
)]
#[get("/calculations/{id}")]
pub async fn get_calculation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Calculation>> {
    let id = CalculationId::new(path.into_inner());
    let record = state.calculations.fetch(id).await?;
    Ok(web::Json(record))
}

/// Edit a calculation in place, recomputing its result.
#[utoipa::path(
    put,
    path = "/calculations/{id}",
    params(("id" = i32, Path, description = "Calculation identifier")),
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Updated record", body = Calculation),
        (status = 400, description = "Division by zero or unknown operation", body = Error),
        (status = 404, description = "No record with that identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "updateCalculation"
)]
#[put("/calculations/{id}")]
pub async fn update_calculation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<CalculationRequest>,
) -> ApiResult<web::Json<Calculation>> {
    let id = CalculationId::new(path.into_inner());
    let draft = CalculationDraft::try_from(payload.into_inner())?;
    let record = state.calculations.update(id, draft).await?;
    Ok(web::Json(record))
}

/// Delete a calculation permanently.
#[utoipa::path(
    delete,
    path = "/calculations/{id}",
    params(("id" = i32, Path, description = "Calculation identifier")),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeleteConfirmation),
        (status = 404, description = "No record with that identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["calculations"],
    operation_id = "deleteCalculation"
)]
#[delete("/calculations/{id}")]
pub async fn delete_calculation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeleteConfirmation>> {
    let id = CalculationId::new(path.into_inner());
    state.calculations.delete(id).await?;
    Ok(web::Json(DeleteConfirmation {
        message: format!("calculation {id} deleted"),
    }))
}
