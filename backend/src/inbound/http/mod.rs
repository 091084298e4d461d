//! HTTP inbound adapter exposing the user endpoints and health probes.

pub mod health;
pub mod presenter;
pub mod state;
pub mod users;
