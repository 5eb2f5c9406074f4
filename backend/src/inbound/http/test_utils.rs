//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::error::json_config;
use super::state::HttpState;
use super::{accounts, users};
use crate::domain::ports::UserRegistry;

/// Build an app exposing the registry routes over `registry`.
pub fn registry_app(
    registry: impl UserRegistry + 'static,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(registry));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .configure(users::configure)
        .configure(accounts::configure)
}
