//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the
//! `UserRegistry` driving port.

use std::sync::Arc;

use crate::domain::ports::UserRegistry;

#[derive(Clone)]
pub struct HttpState {
    pub registry: Arc<dyn UserRegistry>,
}

impl HttpState {
    pub fn new(registry: Arc<dyn UserRegistry>) -> Self {
        Self { registry }
    }
}
