//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings, SettingsError};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use users_backend::Trace;
#[cfg(debug_assertions)]
use users_backend::doc::ApiDoc;
use users_backend::domain::ports::InMemoryUserRepository;
use users_backend::inbound::http::health::{HealthState, live, ready};
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::ui::ui;
use users_backend::inbound::http::users::{
    create_user, delete_user, get_user, home, list_users, update_user,
};
use users_backend::inbound::http::validation::{json_config, path_config};
use users_backend::outbound::persistence::DieselUserRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the user ports to PostgreSQL when a pool is configured, otherwise to
/// the in-memory store.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user repository");
            HttpState::from_repository(Arc::new(DieselUserRepository::new(pool.clone())))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            HttpState::from_repository(Arc::new(InMemoryUserRepository::new()))
        }
    }
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
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(home)
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(ui)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    info!(bind_addr = %config.bind_addr, "server listening");
    Ok(server)
}
