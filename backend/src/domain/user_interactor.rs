//! User use case implementing the [`UserInputPort`] driving port.
//!
//! The interactor is the only place where the presentation boundary and the
//! storage boundary meet. It forwards the repository outcome to the output
//! port without inspecting it, so renderers and repositories can vary
//! independently.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserInputPort, UserOutputPort, UserRepository, UserRepositoryError};
use crate::domain::{User, UserId, UserName};

/// Per-request user interactor bound to one output port and one repository.
pub struct UserInteractor<O> {
    output: O,
    repository: Arc<dyn UserRepository>,
}

impl<O> UserInteractor<O>
where
    O: UserOutputPort,
{
    /// Bind an output port and a repository for a single request.
    pub fn new(output: O, repository: Arc<dyn UserRepository>) -> Self {
        Self { output, repository }
    }

    fn present(self, outcome: Result<User, UserRepositoryError>) {
        match outcome {
            Ok(user) => self.output.render(user),
            Err(error) => self.output.render_error(error),
        }
    }
}

#[async_trait]
impl<O> UserInputPort for UserInteractor<O>
where
    O: UserOutputPort + 'static,
{
    async fn get_user_by_id(self, id: String) {
        let outcome = match UserId::new(id) {
            Ok(id) => self.repository.fetch_by_id(&id).await,
            Err(err) => Err(err.into()),
        };
        self.present(outcome);
    }

    async fn post_user_by_name(self, name: String) {
        let outcome = match UserName::new(name) {
            Ok(name) => self.repository.create_by_name(&name).await,
            Err(err) => Err(err.into()),
        };
        self.present(outcome);
    }
}

#[cfg(test)]
#[path = "user_interactor_tests.rs"]
mod tests;
