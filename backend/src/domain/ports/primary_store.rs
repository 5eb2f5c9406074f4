//! Port abstraction for the relational primary store.
//!
//! The primary store is the source of truth for users and accounts. It owns
//! identifier assignment and the foreign-key link from an account to its
//! user.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Account, AccountId, NewAccount, NewUser, User, UserId};

define_port_error! {
    /// Errors raised by primary store adapters.
    pub enum PrimaryStoreError {
        /// The store could not be reached or no pooled connection was free.
        Connection { message: String } => "primary store connection failed: {message}",
        /// A statement failed during execution.
        Query { message: String } => "primary store query failed: {message}",
        /// The referenced owning user does not exist.
        UnknownUser { user_id: String } => "user {user_id} does not exist",
        /// The owning user already holds `limit` accounts.
        AccountLimitReached { user_id: String, limit: usize } =>
            "user {user_id} already owns {limit} accounts",
    }
}

/// Read and write operations against the primary store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrimaryStore: Send + Sync {
    /// Insert a user and return it with its newly assigned identifier.
    async fn insert_user(&self, user: NewUser) -> Result<User, PrimaryStoreError>;

    /// Fetch a user by identifier.
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, PrimaryStoreError>;

    /// List the accounts owned by `user_id`.
    async fn accounts_for_user(&self, user_id: &UserId) -> Result<Vec<Account>, PrimaryStoreError>;

    /// Insert an account, re-checking ownership and `limit` atomically with
    /// the write.
    ///
    /// Implementations must reject the insert with
    /// [`PrimaryStoreError::AccountLimitReached`] when the owner already has
    /// `limit` accounts, and with [`PrimaryStoreError::UnknownUser`] when the
    /// owner does not exist.
    async fn insert_account(
        &self,
        account: NewAccount,
        limit: usize,
    ) -> Result<Account, PrimaryStoreError>;

    /// Fetch the user that owns the account with identifier `account_id`.
    async fn find_user_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<User>, PrimaryStoreError>;
}
