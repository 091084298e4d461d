//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs and the table schema stay private to this module, and
//! every driver error is classified into the port's error type before it
//! leaves.
//!
//! # Example
//!
//! ```no_run
//! use user_service::domain::ports::UserRepositoryFactory;
//! use user_service::outbound::persistence::{DbPool, DieselUserRepositoryFactory, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let factory = DieselUserRepositoryFactory::new(pool);
//! let _repository = factory.build();
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::{DieselUserRepository, DieselUserRepositoryFactory};
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
