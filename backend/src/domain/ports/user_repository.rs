//! Driven port for user storage adapters and their errors.
//!
//! Adapters classify every failure into one of the variants below. Storage
//! details (driver messages, SQL state, connection strings) are logged by the
//! adapter and never copied into the error, because the message travels up to
//! the transport boundary unchanged.
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{User, UserId, UserName, UserValidationError};

use super::define_port_error;

define_port_error! {
    /// Failures signalled by user repository adapters.
    pub enum UserRepositoryError {
        /// No stored user matches the requested identifier.
        NotFound { id: String } => "user not found: {id}",
        /// The backing store failed; `operation` names what was attempted.
        StorageFailure { operation: String } => "internal server error while {operation}",
        /// The caller supplied an identifier or name that violates the entity invariants.
        InvalidInput { message: String } => "{message}",
    }
}

impl From<UserValidationError> for UserRepositoryError {
    fn from(value: UserValidationError) -> Self {
        Self::invalid_input(value.to_string())
    }
}

/// Storage access for [`User`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user stored under `id`.
    async fn fetch_by_id(&self, id: &UserId) -> Result<User, UserRepositoryError>;

    /// Persist a new user named `name` under a freshly generated identifier.
    async fn create_by_name(&self, name: &UserName) -> Result<User, UserRepositoryError>;
}

/// Builds one repository handle per request.
///
/// Implementations hold the process-wide storage handle (a connection pool or
/// a shared in-memory store) and hand out cheap per-request repositories that
/// borrow it without mutating it.
pub trait UserRepositoryFactory: Send + Sync {
    /// Construct a repository bound to the shared storage handle.
    fn build(&self) -> Arc<dyn UserRepository>;
}

impl<F> UserRepositoryFactory for F
where
    F: Fn() -> Arc<dyn UserRepository> + Send + Sync,
{
    fn build(&self) -> Arc<dyn UserRepository> {
        self()
    }
}
