//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`. It carries factories
//! rather than repositories: every request builds its own boundary objects,
//! so the state stays read-only once the server starts.

use std::sync::Arc;

use crate::domain::ports::UserRepositoryFactory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Builds one user repository per request.
    pub users: Arc<dyn UserRepositoryFactory>,
}

impl HttpState {
    /// Construct state around a repository factory.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_service::inbound::http::state::HttpState;
    /// use user_service::outbound::memory::InMemoryUserRepositoryFactory;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserRepositoryFactory::default()));
    /// let _repository = state.users.build();
    /// ```
    pub fn new(users: Arc<dyn UserRepositoryFactory>) -> Self {
        Self { users }
    }
}
