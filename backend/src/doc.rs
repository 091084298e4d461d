//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user endpoints, the health probes and the
//! create-user request body. The document is served by Swagger UI in debug
//! builds and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::users::CreateUserRequest;

/// OpenAPI document for the HTTP API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "Fetch users by id and create users by name."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::post_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CreateUserRequest)),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
