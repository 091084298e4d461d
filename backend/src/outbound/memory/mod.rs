//! Process-local user store.
//!
//! Serves requests when no database URL is configured and backs the
//! handler-level integration tests. It honours the same repository contract
//! as the Diesel adapter: fresh UUID ids on create, `NotFound` on a missing
//! id, duplicate names allowed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError, UserRepositoryFactory};
use crate::domain::{User, UserId, UserName};

/// Shared map of users keyed by id. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `user` as-is, replacing any user with the same id.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id().clone(), user);
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Ids of every stored user, in no particular order.
    pub async fn ids(&self) -> Vec<UserId> {
        self.users.read().await.keys().cloned().collect()
    }
}

/// Per-request repository over an [`InMemoryUserStore`].
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryUserStore,
}

impl InMemoryUserRepository {
    /// Bind a repository to `store`.
    pub fn new(store: InMemoryUserStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn fetch_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError> {
        self.store
            .users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(id.to_string()))
    }

    async fn create_by_name(&self, name: &UserName) -> Result<User, UserRepositoryError> {
        let user = User::new(UserId::random(), name.clone());
        self.store.insert(user.clone()).await;
        Ok(user)
    }
}

/// Hands every request its own [`InMemoryUserRepository`] over one store.
#[derive(Clone, Default)]
pub struct InMemoryUserRepositoryFactory {
    store: InMemoryUserStore,
}

impl InMemoryUserRepositoryFactory {
    /// Create a factory sharing `store` with every repository it builds.
    pub fn new(store: InMemoryUserStore) -> Self {
        Self { store }
    }
}

impl UserRepositoryFactory for InMemoryUserRepositoryFactory {
    fn build(&self) -> Arc<dyn UserRepository> {
        Arc::new(InMemoryUserRepository::new(self.store.clone()))
    }
}
