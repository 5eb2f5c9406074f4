//! Subscriber registry library: domain, adapters, and configuration.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::Trace;
