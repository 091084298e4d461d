//! Classification of pool and Diesel failures into repository errors.
//!
//! The driver detail is logged here and dropped: callers only ever see
//! [`UserRepositoryError::StorageFailure`] naming the attempted operation.

use diesel::result::Error as DieselError;
use tracing::error;

use crate::domain::ports::UserRepositoryError;

use super::pool::PoolError;

/// Log a failed connection checkout and classify it as a storage failure.
pub(super) fn map_pool_error(err: PoolError, operation: &'static str) -> UserRepositoryError {
    error!(error = %err, operation, "user store connection unavailable");
    UserRepositoryError::storage_failure(operation)
}

/// Log a failed query and classify it as a storage failure.
///
/// Unique and foreign key violations are storage failures too; the user
/// store has no separate conflict outcome.
pub(super) fn map_diesel_error(err: DieselError, operation: &'static str) -> UserRepositoryError {
    match &err {
        DieselError::DatabaseError(kind, info) => {
            error!(?kind, message = info.message(), operation, "user store query failed");
        }
        other => error!(error = %other, operation, "user store query failed"),
    }
    UserRepositoryError::storage_failure(operation)
}
