//! User registration and lookup handlers.
//!
//! ```text
//! POST /user {"name":"Ann","address":"1 Oak St","email":"ann@x.com"}
//! GET /{id}/user/mysql
//! GET /{id}/user/mongo
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, NewUser, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{RegisteredUserSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /user`.
///
/// Any client-supplied `id` is ignored; stores assign identifiers.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegisterUserRequest {
    pub name: String,
    pub address: String,
    pub email: String,
}

impl TryFrom<RegisterUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: RegisterUserRequest) -> Result<Self, Self::Error> {
        NewUser::try_new(value.name, value.address, value.email)
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyName => "name",
        UserValidationError::EmptyAddress => "address",
        UserValidationError::EmptyEmail => "email",
        UserValidationError::EmptyId | UserValidationError::InvalidId => "id",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Register a user in both stores.
#[utoipa::path(
    post,
    path = "/user",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "User stored in both stores", body = RegisteredUserSchema),
        (status = 400, description = "Invalid request body", body = String, content_type = "text/plain"),
        (status = 500, description = "A store write failed", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/user")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = NewUser::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let registered = state.registry.register_user(user).await?;
    Ok(Envelope::success(registered).into_response())
}

/// Fetch a user from the relational primary store.
#[utoipa::path(
    get,
    path = "/{id}/user/mysql",
    params(("id" = String, Path, description = "Primary store user identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "No such user", body = String, content_type = "text/plain"),
        (status = 503, description = "Primary store unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getPrimaryUser"
)]
#[get("/{id}/user/mysql")]
pub async fn get_primary_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state.registry.get_user_by_id(&path.into_inner()).await?;
    Ok(Envelope::success(user).into_response())
}

/// Fetch a user document from the secondary store.
#[utoipa::path(
    get,
    path = "/{id}/user/mongo",
    params(("id" = String, Path, description = "Secondary store document key")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Blank identifier", body = String, content_type = "text/plain"),
        (status = 404, description = "No such document", body = String, content_type = "text/plain"),
        (status = 503, description = "Secondary store unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getSecondaryUser"
)]
#[get("/{id}/user/mongo")]
pub async fn get_secondary_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state
        .registry
        .get_secondary_user_by_id(&path.into_inner())
        .await?;
    Ok(Envelope::success(user).into_response())
}

/// Register the user routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_user)
        .service(get_primary_user)
        .service(get_secondary_user);
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
