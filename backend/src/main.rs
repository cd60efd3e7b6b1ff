//! Backend entry-point: loads settings, prepares the store and serves the
//! REST API, browser UI and health probes.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use users_backend::inbound::http::health::HealthState;
use users_backend::outbound::persistence::{DbPool, ensure_schema};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load server settings")?;
    let mut config = ServerConfig::new(settings.bind_addr()?);

    if let Some(pool_config) = settings.pool_config()? {
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to connect to the user store")?;
        ensure_schema(&pool)
            .await
            .wrap_err("failed to prepare the users table")?;
        info!("user store ready");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_draining();
    result.wrap_err("server terminated with an error")
}
