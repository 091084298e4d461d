//! PostgreSQL-backed `UserRepository` adapter.
//!
//! Each call checks out one pooled connection and issues exactly one
//! statement: a point lookup on `users.id` or a single-row insert.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError, UserRepositoryFactory};
use crate::domain::{User, UserId, UserName};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

const FETCH_OPERATION: &str = "fetching user";
const CREATE_OPERATION: &str = "creating user";

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Bind a repository to the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from_strings(&row.id, row.name).map_err(|err| {
        tracing::error!(user_id = %row.id, error = %err, "stored user row violates invariants");
        UserRepositoryError::storage_failure(FETCH_OPERATION)
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn fetch_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FETCH_OPERATION))?;

        let key: &str = id.as_ref();
        let row = users::table
            .filter(users::id.eq(key))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, FETCH_OPERATION))?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(UserRepositoryError::not_found(key)),
        }
    }

    async fn create_by_name(&self, name: &UserName) -> Result<User, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CREATE_OPERATION))?;

        let id = UserId::random();
        let new_row = NewUserRow {
            id: id.as_ref(),
            name: name.as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, CREATE_OPERATION))?;

        Ok(User::new(id, name.clone()))
    }
}

/// Hands every request its own [`DieselUserRepository`] over the shared pool.
#[derive(Clone)]
pub struct DieselUserRepositoryFactory {
    pool: DbPool,
}

impl DieselUserRepositoryFactory {
    /// Create a factory sharing `pool` with every repository it builds.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepositoryFactory for DieselUserRepositoryFactory {
    fn build(&self) -> Arc<dyn UserRepository> {
        Arc::new(DieselUserRepository::new(self.pool.clone()))
    }
}
