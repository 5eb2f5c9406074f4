//! HTTP adapter mapping for domain errors.
//!
//! Failures render as plain text carrying the domain message, with the
//! status chosen from the error code.

use actix_web::error::JsonPayloadError;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

/// Body returned when a JSON payload cannot be decoded.
pub const BODY_NOT_VALID: &str = "request body not valid";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::AccountLimitExceeded
        | ErrorCode::PrimaryWriteFailed
        | ErrorCode::SecondaryWriteFailed
        | ErrorCode::IntegrityViolation
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = %self.code(),
                message = self.message(),
                details = ?self.details(),
                trace_id = self.trace_id(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(status);
        builder.content_type(ContentType::plaintext());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(self.message().to_owned())
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(BODY_NOT_VALID).into()
}

/// JSON extractor configuration rejecting undecodable bodies with 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
