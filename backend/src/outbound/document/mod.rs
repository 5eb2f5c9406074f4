//! MongoDB adapter for the secondary store.

mod client;
mod documents;
mod mongo_secondary_store;

pub use client::{DEFAULT_MAX_POOL_SIZE, DocumentStore, DocumentStoreConfig, DocumentStoreError};
pub use mongo_secondary_store::MongoSecondaryStore;
