//! User request handlers.
//!
//! ```text
//! GET  /user/{id}          -> 200 <name> | 404 | 500
//! POST /user {"Name":"x"}  -> 200 <name> | 400 | 500
//! any other method         -> 405
//! ```
//!
//! Handlers hold no logic of their own: they pull primitive arguments out of
//! the request, build a presenter, a repository and an interactor for this
//! request only, and hand over to the interactor.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::UserInteractor;
use crate::domain::ports::UserInputPort;
use crate::inbound::http::presenter::HttpUserPresenter;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /user`.
///
/// The field is spelled `Name`, but [`CreateUserRequest::from_json`] matches
/// the key in any letter case. A missing or `null` field decodes as an empty
/// name, which the use case rejects.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[serde(rename = "Name", default)]
    #[schema(example = "Alice")]
    pub name: String,
}

impl CreateUserRequest {
    /// Decode a request body.
    ///
    /// An exact `Name` key wins; otherwise the first key equal to `name`
    /// ignoring ASCII case is used. Bodies that are not a JSON object, or
    /// whose matched value is not a string, are rejected.
    ///
    /// # Examples
    /// ```
    /// use user_service::inbound::http::users::CreateUserRequest;
    ///
    /// let request = CreateUserRequest::from_json(br#"{"NAME":"Alice"}"#).unwrap();
    /// assert_eq!(request.name, "Alice");
    /// ```
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let fields: serde_json::Map<String, Value> = serde_json::from_slice(body)?;
        let value = fields.get("Name").or_else(|| {
            fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("name"))
                .map(|(_, value)| value)
        });
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => Ok(Self {
                name: String::deserialize(value)?,
            }),
        }
    }
}

/// Register the user routes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users;
///
/// let _app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user/{id}")
            .route(web::get().to(get_user))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/user")
            .route(web::post().to(post_user))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Fetch a user's name by id.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User name", body = String, content_type = "text/plain"),
        (status = 404, description = "No user with this id", body = String, content_type = "text/plain"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
pub async fn get_user(state: web::Data<HttpState>, id: web::Path<String>) -> HttpResponse {
    let (presenter, pending) = HttpUserPresenter::channel();
    let repository = state.users.build();
    UserInteractor::new(presenter, repository)
        .get_user_by_id(id.into_inner())
        .await;
    pending.into_response().await
}

/// Create a user and return its name.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Name of the created user", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed body or empty name"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "postUserByName"
)]
pub async fn post_user(state: web::Data<HttpState>, body: web::Bytes) -> HttpResponse {
    let request = match CreateUserRequest::from_json(&body) {
        Ok(request) => request,
        Err(err) => {
            debug!(error = %err, "rejecting malformed create-user body");
            return HttpResponse::BadRequest().finish();
        }
    };

    let (presenter, pending) = HttpUserPresenter::channel();
    let repository = state.users.build();
    UserInteractor::new(presenter, repository)
        .post_user_by_name(request.name)
        .await;
    pending.into_response().await
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}
