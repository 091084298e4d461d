//! Driven port through which the user use case presents its result.

use crate::domain::User;

use super::UserRepositoryError;

/// Presentation boundary for a single user request.
///
/// Both methods take `self` by value: a renderer is built for one request and
/// is spent by whichever outcome it presents, so it cannot be invoked twice.
pub trait UserOutputPort: Send {
    /// Present a successfully loaded or created user.
    fn render(self, user: User);

    /// Present a failure reported by the repository.
    fn render_error(self, error: UserRepositoryError);
}
