//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use registry_backend::domain::ports::UserRegistry;

/// Read timeout for request heads and bodies.
pub const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);
/// Idle keep-alive window for client connections.
pub const KEEP_ALIVE: Duration = Duration::from_secs(120);
/// Upper bound on draining in-flight requests at shutdown.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) registry: Arc<dyn UserRegistry>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, registry: Arc<dyn UserRegistry>) -> Self {
        Self {
            bind_addr,
            registry,
        }
    }
}
