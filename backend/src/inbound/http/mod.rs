//! HTTP inbound adapter exposing the registry endpoints.

pub mod accounts;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::{ApiResult, json_config};
