//! Account registration and owner lookup handlers.
//!
//! ```text
//! POST /account {"msisdn":"15551230100","userID":"<primary user id>"}
//! GET /{accountID}/account
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{AccountValidationError, Error, NewAccount};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{AccountSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /account`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegisterAccountRequest {
    pub msisdn: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}

impl TryFrom<RegisterAccountRequest> for NewAccount {
    type Error = AccountValidationError;

    fn try_from(value: RegisterAccountRequest) -> Result<Self, Self::Error> {
        NewAccount::try_new(value.msisdn, value.user_id)
    }
}

fn map_account_validation_error(err: AccountValidationError) -> Error {
    let field = match err {
        AccountValidationError::EmptyMsisdn => "msisdn",
        AccountValidationError::EmptyUserId | AccountValidationError::InvalidUserId => "userID",
        AccountValidationError::EmptyId | AccountValidationError::InvalidId => "id",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Register an account for an existing user.
///
/// Fails once the user already owns three accounts.
#[utoipa::path(
    post,
    path = "/account",
    request_body = RegisterAccountRequest,
    responses(
        (status = 200, description = "Account stored", body = AccountSchema),
        (status = 400, description = "Invalid request body", body = String, content_type = "text/plain"),
        (status = 404, description = "Owning user does not exist", body = String, content_type = "text/plain"),
        (status = 500, description = "Account limit reached or write failed", body = String, content_type = "text/plain")
    ),
    tags = ["accounts"],
    operation_id = "registerAccount"
)]
#[post("/account")]
pub async fn register_account(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterAccountRequest>,
) -> ApiResult<HttpResponse> {
    let account =
        NewAccount::try_from(payload.into_inner()).map_err(map_account_validation_error)?;
    let created = state.registry.register_account(account).await?;
    Ok(Envelope::success(created).into_response())
}

/// Resolve the primary-store user owning an account.
#[utoipa::path(
    get,
    path = "/{accountID}/account",
    params(("accountID" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Owning user", body = UserSchema),
        (status = 404, description = "Unknown account", body = String, content_type = "text/plain")
    ),
    tags = ["accounts"],
    operation_id = "getAccountOwner"
)]
#[get("/{account_id}/account")]
pub async fn get_account_owner(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = state
        .registry
        .get_user_by_account_id(&path.into_inner())
        .await?;
    Ok(Envelope::success(user).into_response())
}

/// Register the account routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_account).service(get_account_owner);
}
