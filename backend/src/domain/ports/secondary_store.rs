//! Port abstraction for the document secondary store.
//!
//! The secondary store keeps a denormalised copy of each registered user.
//! It never holds accounts.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{NewUser, User, UserId};

define_port_error! {
    /// Errors raised by secondary store adapters.
    pub enum SecondaryStoreError {
        /// The store could not be reached.
        Connection { message: String } => "secondary store connection failed: {message}",
        /// The store rejected or failed the operation.
        Query { message: String } => "secondary store query failed: {message}",
        /// The store acknowledged a write under a different key.
        IntegrityViolation { expected: String, actual: String } =>
            "secondary store reported key {actual} for document {expected}",
    }
}

/// Document store holding the secondary copy of each user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecondaryStore: Send + Sync {
    /// Insert a user document and return it with its assigned key.
    async fn insert_user(&self, user: NewUser) -> Result<User, SecondaryStoreError>;

    /// Fetch a user document by key.
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, SecondaryStoreError>;
}
