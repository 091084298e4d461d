//! User service entry-point: loads settings, wires storage and serves HTTP.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, shutdown_on_signal};
use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use user_service::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;

    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            apply_migrations(database_url.to_owned()).await?;
        }
        let pool_config = PoolConfig::new(database_url)
            .with_max_size(settings.pool_max_size())
            .with_min_idle(Some(settings.pool_min_idle()));
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| io::Error::other(format!("failed to create database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(shutdown_on_signal(health_state, server.handle()));
    server.await
}

/// Run embedded migrations on a blocking thread before the pool is built.
async fn apply_migrations(database_url: String) -> io::Result<()> {
    let applied = web::block(move || run_pending_migrations(&database_url))
        .await
        .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| io::Error::other(format!("failed to apply migrations: {e}")))?;
    info!(applied, "database schema is up to date");
    Ok(())
}
