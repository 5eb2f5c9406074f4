//! OpenAPI documentation for the registry API.
//!
//! Swagger UI serves this document at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::accounts::RegisterAccountRequest;
use crate::inbound::http::schemas::{AccountSchema, RegisteredUserSchema, UserSchema};
use crate::inbound::http::users::RegisterUserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Subscriber registry API",
        description = "Registers users in both stores and accounts in the primary store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_primary_user,
        crate::inbound::http::users::get_secondary_user,
        crate::inbound::http::accounts::register_account,
        crate::inbound::http::accounts::get_account_owner,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        RegisteredUserSchema,
        AccountSchema,
        RegisterUserRequest,
        RegisterAccountRequest
    )),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "accounts", description = "Account registration and owner lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
