//! Registration orchestrator.
//!
//! Implements [`UserRegistry`] on top of the two store ports. User
//! registration writes the primary store first and the secondary store
//! second; a secondary failure leaves the primary row in place and reports
//! its identifier.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    PrimaryStore, PrimaryStoreError, SecondaryStore, SecondaryStoreError, UserRegistry,
};
use crate::domain::{
    ACCOUNT_LIMIT, Account, AccountId, DEFAULT_REQUEST_TIMEOUT, Deadline, DeadlineElapsed, Error,
    NewAccount, NewUser, RegisteredUser, User, UserId,
};

fn map_primary_read_error(error: PrimaryStoreError) -> Error {
    match error {
        PrimaryStoreError::Connection { message } => {
            Error::service_unavailable(format!("primary store unavailable: {message}"))
        }
        other => Error::internal(format!("primary store error: {other}")),
    }
}

fn map_primary_write_error(error: PrimaryStoreError) -> Error {
    match error {
        PrimaryStoreError::UnknownUser { user_id } => {
            Error::not_found(format!("user {user_id} not found"))
        }
        err @ PrimaryStoreError::AccountLimitReached { .. } => {
            Error::account_limit_exceeded(err.to_string())
        }
        other => Error::primary_write_failed(format!("primary store write failed: {other}")),
    }
}

fn map_secondary_read_error(error: SecondaryStoreError) -> Error {
    match error {
        SecondaryStoreError::Connection { message } => {
            Error::service_unavailable(format!("secondary store unavailable: {message}"))
        }
        other => Error::internal(format!("secondary store error: {other}")),
    }
}

fn partial_registration_error(primary_id: &UserId, cause: &SecondaryStoreError) -> Error {
    let message = format!(
        "user registered in primary store as {primary_id} but secondary store write failed: {cause}"
    );
    let error = match cause {
        SecondaryStoreError::IntegrityViolation { .. } => Error::integrity_violation(message),
        _ => Error::secondary_write_failed(message),
    };
    error.with_details(json!({ "primaryId": primary_id.as_ref() }))
}

fn deadline_error(operation: &str) -> Error {
    Error::service_unavailable(format!("{operation} did not complete before the deadline"))
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::invalid_request(format!("invalid user id: {err}")))
}

/// Orchestrates writes and lookups across the primary and secondary stores.
#[derive(Clone)]
pub struct RegistrationService<P, S> {
    primary: Arc<P>,
    secondary: Arc<S>,
    request_timeout: Duration,
}

impl<P, S> RegistrationService<P, S> {
    /// Create a service with the default one second request budget.
    pub fn new(primary: Arc<P>, secondary: Arc<S>) -> Self {
        Self {
            primary,
            secondary,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request budget.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}

#[async_trait]
impl<P, S> UserRegistry for RegistrationService<P, S>
where
    P: PrimaryStore,
    S: SecondaryStore,
{
    async fn register_user(&self, user: NewUser) -> Result<RegisteredUser, Error> {
        let deadline = self.deadline();

        let primary = deadline
            .run(self.primary.insert_user(user.clone()))
            .await
            .map_err(|DeadlineElapsed| {
                Error::primary_write_failed("primary store write did not complete before the deadline")
            })?
            .map_err(map_primary_write_error)?;

        let secondary = match deadline.run(self.secondary.insert_user(user)).await {
            Ok(Ok(secondary)) => secondary,
            Ok(Err(cause)) => {
                warn!(
                    primary_id = %primary.id(),
                    error = %cause,
                    "partial registration: secondary store write failed"
                );
                return Err(partial_registration_error(primary.id(), &cause));
            }
            Err(DeadlineElapsed) => {
                let cause = SecondaryStoreError::connection("deadline elapsed");
                warn!(
                    primary_id = %primary.id(),
                    "partial registration: secondary store write timed out"
                );
                return Err(partial_registration_error(primary.id(), &cause));
            }
        };

        debug!(
            primary_id = %primary.id(),
            secondary_id = %secondary.id(),
            "user registered in both stores"
        );
        Ok(RegisteredUser { primary, secondary })
    }

    async fn register_account(&self, account: NewAccount) -> Result<Account, Error> {
        let deadline = self.deadline();
        let owner = account.user_id().clone();

        let existing = deadline
            .run(self.primary.accounts_for_user(&owner))
            .await
            .map_err(|DeadlineElapsed| deadline_error("account count"))?
            .map_err(map_primary_read_error)?;
        if existing.len() >= ACCOUNT_LIMIT {
            return Err(Error::account_limit_exceeded(format!(
                "user {owner} already owns {ACCOUNT_LIMIT} accounts"
            )));
        }

        let created = deadline
            .run(self.primary.insert_account(account, ACCOUNT_LIMIT))
            .await
            .map_err(|DeadlineElapsed| {
                Error::primary_write_failed("account insert did not complete before the deadline")
            })?
            .map_err(map_primary_write_error)?;

        debug!(account_id = %created.id(), user_id = %owner, "account registered");
        Ok(created)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<User, Error> {
        let id = parse_user_id(id)?;
        self.deadline()
            .run(self.primary.find_user_by_id(&id))
            .await
            .map_err(|DeadlineElapsed| deadline_error("primary user lookup"))?
            .map_err(map_primary_read_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn get_secondary_user_by_id(&self, id: &str) -> Result<User, Error> {
        let id = parse_user_id(id)?;
        self.deadline()
            .run(self.secondary.find_user_by_id(&id))
            .await
            .map_err(|DeadlineElapsed| deadline_error("secondary user lookup"))?
            .map_err(map_secondary_read_error)?
            .ok_or_else(|| Error::not_found(format!("user document {id} not found")))
    }

    async fn get_user_by_account_id(&self, account_id: &str) -> Result<User, Error> {
        let account_id = AccountId::new(account_id)
            .map_err(|err| Error::invalid_request(format!("invalid account id: {err}")))?;
        self.deadline()
            .run(self.primary.find_user_by_account_id(&account_id))
            .await
            .map_err(|DeadlineElapsed| deadline_error("account owner lookup"))?
            .map_err(map_primary_read_error)?
            .ok_or_else(|| Error::not_found(format!("no user owns account {account_id}")))
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
