//! Builders selecting the storage adapter behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use user_service::domain::ports::UserRepositoryFactory;
use user_service::inbound::http::state::HttpState;
use user_service::outbound::memory::InMemoryUserRepositoryFactory;
use user_service::outbound::persistence::DieselUserRepositoryFactory;

use super::ServerConfig;

/// Build the HTTP state, backed by PostgreSQL when a pool is configured and
/// by a process-local store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users: Arc<dyn UserRepositoryFactory> = match &config.db_pool {
        Some(pool) => {
            info!("serving users from PostgreSQL");
            Arc::new(DieselUserRepositoryFactory::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserRepositoryFactory::default())
        }
    };
    web::Data::new(HttpState::new(users))
}
