//! User registration and login endpoints.
//!
//! ```text
//! POST /users/register {"username":"u1","email":"u1@x.com","password":"pw123456"}
//! POST /users/login    {"username":"u1","password":"pw123456"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, Registration, UserValidationError, UserView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    /// Requested unique account name.
    pub username: String,
    /// Requested unique email address.
    pub email: String,
    /// Plaintext password; hashed before persistence, never stored.
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

fn map_registration_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::InvalidEmail => Error::invalid_email("email must be a valid address")
            .with_details(json!({ "field": "email" })),
        UserValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username" })),
        UserValidationError::UsernameTooLong { max } => {
            Error::invalid_request(format!("username must be at most {max} characters"))
                .with_details(json!({ "field": "username" }))
        }
        UserValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password" })),
    }
}

/// Register a new user.
///
/// Responses never contain password material; the handler only ever sees
/// the [`UserView`] projection.
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered user", body = UserView),
        (status = 400, description = "Duplicate user or invalid email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users/register")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<UserView>> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(&body.username, &body.email, &body.password)
        .map_err(map_registration_validation_error)?;
    let view = state.users.register(registration).await?;
    Ok(web::Json(view))
}

/// Verify credentials and return the matching user.
///
/// Unknown usernames and wrong passwords produce the same 401 payload so
/// callers cannot probe which accounts exist.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated user", body = UserView),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "loginUser"
)]
#[post("/users/login")]
pub async fn login_user(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserView>> {
    let body = payload.into_inner();
    // Shape failures collapse into the credential error: an empty field can
    // never authenticate, and the uniform outcome reveals nothing.
    let credentials = LoginCredentials::try_from_parts(&body.username, &body.password)
        .map_err(|_| Error::invalid_credentials("invalid username or password"))?;
    let view = state.users.login(credentials).await?;
    Ok(web::Json(view))
}
