//! PostgreSQL adapter for the primary store.
//!
//! Diesel row structs and table definitions stay private to this module;
//! only the pool and the `PrimaryStore` implementation are exported.
//!
//! # Example
//!
//! ```ignore
//! use registry_backend::outbound::persistence::{DbPool, DieselPrimaryStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let store = DieselPrimaryStore::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_primary_store;
mod models;
mod pool;
mod schema;

pub use diesel_primary_store::DieselPrimaryStore;
pub use pool::{DEFAULT_MAX_POOL_SIZE, DbPool, PoolConfig, PoolError};
