//! Driving port exposing the user use cases to inbound adapters.
//!
//! Inbound adapters pass primitive request arguments in and never receive a
//! result back: the outcome is delivered through the
//! [`UserOutputPort`](super::UserOutputPort) the use case was built with.

use async_trait::async_trait;

/// Use cases for reading and creating users.
///
/// Implementations are per-request values and are consumed by the call.
#[async_trait]
pub trait UserInputPort: Send {
    /// Load the user stored under `id` and present it.
    async fn get_user_by_id(self, id: String);

    /// Create a user called `name` and present it.
    async fn post_user_by_name(self, name: String);
}
