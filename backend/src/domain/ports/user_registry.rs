//! Driving port for the registration use cases.
//!
//! Inbound adapters depend on this trait rather than on the concrete
//! service, so handlers can be exercised against a mock.

use async_trait::async_trait;

use crate::domain::{Account, Error, NewAccount, NewUser, RegisteredUser, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Persist a user in both stores.
    async fn register_user(&self, user: NewUser) -> Result<RegisteredUser, Error>;

    /// Persist an account for an existing primary-store user.
    async fn register_account(&self, account: NewAccount) -> Result<Account, Error>;

    /// Look a user up in the primary store by raw path identifier.
    async fn get_user_by_id(&self, id: &str) -> Result<User, Error>;

    /// Look a user up in the secondary store by raw path identifier.
    async fn get_secondary_user_by_id(&self, id: &str) -> Result<User, Error>;

    /// Look up the primary-store user owning the given account.
    async fn get_user_by_account_id(&self, account_id: &str) -> Result<User, Error>;
}
