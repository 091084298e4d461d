//! HTTP implementation of the [`UserOutputPort`].
//!
//! The presenter owns the sending half of a one-shot channel, which is the
//! single response sink for its request. Rendering consumes the presenter and
//! sends a status and plain-text body; the handler awaits the receiving half
//! once the use case returns and turns it into the actix response.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use tokio::sync::oneshot;
use tracing::{debug, error};

use crate::domain::User;
use crate::domain::ports::{UserOutputPort, UserRepositoryError};

/// Status and body written by a presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    status: StatusCode,
    body: String,
}

impl RenderedResponse {
    /// Status code chosen by the presenter.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Plain-text response body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl From<RenderedResponse> for HttpResponse {
    fn from(value: RenderedResponse) -> Self {
        HttpResponse::build(value.status)
            .content_type(ContentType::plaintext())
            .body(value.body)
    }
}

fn status_for(error: &UserRepositoryError) -> StatusCode {
    match error {
        UserRepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
        UserRepositoryError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        UserRepositoryError::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Presenter writing user results as plain-text HTTP responses.
pub struct HttpUserPresenter {
    sink: oneshot::Sender<RenderedResponse>,
}

impl HttpUserPresenter {
    /// Create a presenter and the pending response it will fill.
    pub fn channel() -> (Self, PendingResponse) {
        let (sink, receiver) = oneshot::channel();
        (Self { sink }, PendingResponse { receiver })
    }

    fn emit(self, response: RenderedResponse) {
        if self.sink.send(response).is_err() {
            debug!("response sink closed before the presenter rendered");
        }
    }
}

impl UserOutputPort for HttpUserPresenter {
    fn render(self, user: User) {
        self.emit(RenderedResponse {
            status: StatusCode::OK,
            body: user.name().to_string(),
        });
    }

    fn render_error(self, error: UserRepositoryError) {
        self.emit(RenderedResponse {
            status: status_for(&error),
            body: error.to_string(),
        });
    }
}

/// Receiving half of a presenter's response sink.
pub struct PendingResponse {
    receiver: oneshot::Receiver<RenderedResponse>,
}

impl PendingResponse {
    /// Wait for the rendered response.
    ///
    /// Returns `None` when the presenter was dropped without rendering.
    pub async fn rendered(self) -> Option<RenderedResponse> {
        self.receiver.await.ok()
    }

    /// Resolve into the HTTP response written by the presenter.
    ///
    /// A presenter dropped without rendering yields an empty 500.
    pub async fn into_response(self) -> HttpResponse {
        match self.rendered().await {
            Some(rendered) => rendered.into(),
            None => {
                error!("user use case finished without presenting a response");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}
