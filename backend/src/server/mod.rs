//! Server construction and route wiring.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{
    CalculationRepository, InMemoryCalculationRepository, InMemoryUserRepository, UserRepository,
};
use crate::domain::{CalculationServiceImpl, UserServiceImpl};
use crate::inbound::http::calculations::{
    create_calculation, delete_calculation, get_calculation, list_calculations, update_calculation,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login_user, register_user};
use crate::outbound::persistence::{
    DbPool, DieselCalculationRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use crate::outbound::security::Argon2PasswordHasher;

/// Build the repository pair backing the domain services.
///
/// Uses database-backed adapters when the configuration carries a
/// `DATABASE_URL`, otherwise in-memory repositories so the server still
/// serves traffic for local development.
async fn build_repositories(
    config: &ServerConfig,
) -> std::io::Result<(Arc<dyn CalculationRepository>, Arc<dyn UserRepository>)> {
    match config.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            Ok((
                Arc::new(DieselCalculationRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool)),
            ))
        }
        None => Ok((
            Arc::new(InMemoryCalculationRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )),
    }
}

/// Assemble the shared HTTP state from the configured adapters.
async fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let (calculations_repo, users_repo) = build_repositories(config).await?;
    let calculations = Arc::new(CalculationServiceImpl::new(calculations_repo));
    let users = Arc::new(UserServiceImpl::new(
        users_repo,
        Arc::new(Argon2PasswordHasher::new()),
    ));
    Ok(web::Data::new(HttpState::new(calculations, users)))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(create_calculation)
        .service(list_calculations)
        .service(get_calculation)
        .service(update_calculation)
        .service(delete_calculation)
        .service(register_user)
        .service(login_user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the socket is
///   bound and adapters are initialised.
/// - `config`: pre-built [`ServerConfig`].
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when migrations, pool construction, or
/// socket binding fail.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config).await?;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
