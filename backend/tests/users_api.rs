//! End-to-end registration and login tests with real Argon2id hashing.

use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{login_user, register_user};

mod support;
use support::users_service_with_argon2;

fn users_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        std::sync::Arc::new(backend::domain::CalculationServiceImpl::new(
            std::sync::Arc::new(backend::domain::ports::InMemoryCalculationRepository::new()),
        )),
        users_service_with_argon2(),
    );
    App::new()
        .app_data(web::Data::new(state))
        .service(register_user)
        .service(login_user)
}

async fn post(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    uri: &str,
    body: Value,
) -> actix_web::dev::ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(&body)
        .to_request();
    actix_test::call_service(app, request).await
}

#[actix_web::test]
async fn register_then_login_round_trips_through_argon2() {
    let app = actix_test::init_service(users_app()).await;
    let response = post(
        &app,
        "/users/register",
        json!({ "username": "ada", "email": "ada@example.com", "password": "s3cret-enough" }),
    )
    .await;
    assert!(response.status().is_success());
    let registered: Value = actix_test::read_body_json(response).await;
    assert_eq!(registered.get("username"), Some(&json!("ada")));
    assert!(registered.get("password").is_none());
    assert!(registered.get("password_hash").is_none());

    let response = post(
        &app,
        "/users/login",
        json!({ "username": "ada", "password": "s3cret-enough" }),
    )
    .await;
    assert!(response.status().is_success());
    let authenticated: Value = actix_test::read_body_json(response).await;
    assert_eq!(authenticated.get("id"), registered.get("id"));
    assert_eq!(authenticated.get("email"), Some(&json!("ada@example.com")));
}

#[rstest]
#[case(json!({ "username": "ada", "email": "other@example.com", "password": "pw123456" }))]
#[case(json!({ "username": "other", "email": "ada@example.com", "password": "pw123456" }))]
#[actix_web::test]
async fn duplicate_username_or_email_is_rejected(#[case] second_registration: Value) {
    let app = actix_test::init_service(users_app()).await;
    let first = post(
        &app,
        "/users/register",
        json!({ "username": "ada", "email": "ada@example.com", "password": "pw123456" }),
    )
    .await;
    assert!(first.status().is_success());

    let second = post(&app, "/users/register", second_registration).await;
    assert_eq!(second.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(second).await;
    assert_eq!(error.get("code"), Some(&json!("duplicate_user")));
    let message = error.get("message").and_then(Value::as_str).expect("message");
    assert!(message.contains("already exists"));
}

#[rstest]
#[case("plainaddress")]
#[case("missing@tld")]
#[case("two@@example.com")]
#[actix_web::test]
async fn malformed_emails_are_rejected_before_hashing(#[case] email: &str) {
    let app = actix_test::init_service(users_app()).await;
    let response = post(
        &app,
        "/users/register",
        json!({ "username": "tester", "email": email, "password": "pw123456" }),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error.get("code"), Some(&json!("invalid_email")));
}

#[rstest]
#[case(json!({ "username": "ghost", "password": "whatever123" }))]
#[case(json!({ "username": "ada", "password": "not-the-password" }))]
#[case(json!({ "username": "ada", "password": "" }))]
#[actix_web::test]
async fn login_failures_are_uniform_401s(#[case] login_body: Value) {
    let app = actix_test::init_service(users_app()).await;
    post(
        &app,
        "/users/register",
        json!({ "username": "ada", "email": "ada@example.com", "password": "pw123456" }),
    )
    .await;

    let response = post(&app, "/users/login", login_body).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error.get("code"), Some(&json!("invalid_credentials")));
}
