//! MongoDB client construction for the secondary store.
//!
//! The database name comes from the path segment of the connection URI, for
//! example `mongodb://localhost:27017/registry`.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

/// Default upper bound on pooled MongoDB connections.
pub const DEFAULT_MAX_POOL_SIZE: u32 = 50;

/// Errors raised while connecting to the document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("invalid MongoDB URI: {message}")]
    InvalidUri { message: String },
    #[error("MongoDB URI must name a database in its path")]
    MissingDatabase,
    #[error("failed to connect to MongoDB: {message}")]
    Connect { message: String },
}

/// Connection settings for the document store.
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    uri: String,
    max_pool_size: u32,
}

impl DocumentStoreConfig {
    /// Configuration for `uri`; its path names the database.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }

    /// Cap the driver's connection pool.
    pub fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Parse the URI into driver options, applying the pool bound.
    ///
    /// # Errors
    ///
    /// Fails when the URI is malformed or names no database.
    pub async fn client_options(&self) -> Result<ClientOptions, DocumentStoreError> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|err| DocumentStoreError::InvalidUri {
                message: err.to_string(),
            })?;
        if options.default_database.as_deref().is_none_or(str::is_empty) {
            return Err(DocumentStoreError::MissingDatabase);
        }
        options.max_pool_size = Some(self.max_pool_size);
        Ok(options)
    }
}

/// Connected client plus the database selected by the URI.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    client: Client,
    database: Database,
}

impl DocumentStore {
    /// Connect and verify reachability with a `ping` command.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError`] for an unusable URI or when the ping
    /// fails.
    pub async fn connect(config: &DocumentStoreConfig) -> Result<Self, DocumentStoreError> {
        let options = config.client_options().await?;
        let client = Client::with_options(options).map_err(|err| DocumentStoreError::Connect {
            message: err.to_string(),
        })?;
        let database = client
            .default_database()
            .ok_or(DocumentStoreError::MissingDatabase)?;

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| DocumentStoreError::Connect {
                message: err.to_string(),
            })?;
        info!(database = database.name(), "connected to document store");

        Ok(Self { client, database })
    }

    /// Database named by the connection URI.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Close pooled connections. Outstanding handles stop working afterwards.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
