//! Success envelope wrapping every 200 response body.

use actix_web::HttpResponse;
use serde::Serialize;

/// Status label carried by successful responses.
pub const SUCCESS_STATUS: &str = "Success (200)";

/// `{"status": "Success (200)", "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: SUCCESS_STATUS,
            data,
        }
    }

    /// Render as a `200 OK` JSON response.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}
