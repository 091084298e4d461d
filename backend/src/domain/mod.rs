//! Domain primitives, ports and use cases.
//!
//! Purpose: define the `User` entity, the ports the user use case speaks
//! through, and the interactor that joins them. Nothing in this module knows
//! about HTTP or SQL; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - User, UserId, UserName — the entity and its validated components.
//! - UserInteractor — per-request implementation of `ports::UserInputPort`.

pub mod ports;
pub mod user;
mod user_interactor;

pub use self::user::{User, UserId, UserName, UserValidationError};
pub use self::user_interactor::UserInteractor;
