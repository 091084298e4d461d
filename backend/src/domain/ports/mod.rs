//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_input_port;
mod user_output_port;
mod user_repository;

pub use user_input_port::UserInputPort;
pub use user_output_port::UserOutputPort;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError, UserRepositoryFactory};
