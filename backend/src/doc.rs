//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: the calculation BREAD endpoints, user registration and
//! login, and the health probes. The generated document backs Swagger UI in
//! debug builds.

use utoipa::OpenApi;

use crate::domain::{Calculation, CalculationId, Error, ErrorCode, Operation, UserId, UserView};
use crate::inbound::http::calculations::{CalculationRequest, DeleteConfirmation};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculator backend API",
        description = "HTTP interface for stored calculations and user accounts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::calculations::create_calculation,
        crate::inbound::http::calculations::list_calculations,
        crate::inbound::http::calculations::get_calculation,
        crate::inbound::http::calculations::update_calculation,
        crate::inbound::http::calculations::delete_calculation,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::login_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Calculation,
        CalculationId,
        Operation,
        CalculationRequest,
        DeleteConfirmation,
        RegisterRequest,
        LoginRequest,
        UserView,
        UserId,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "calculations", description = "Stored calculation records"),
        (name = "users", description = "Registration and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
