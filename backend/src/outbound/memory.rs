//! In-memory store adapters for tests.
//!
//! Both stores honour the same invariants as the database adapters: the
//! account limit is checked and applied under one lock, and identifiers are
//! generated at insert time. Failure switches let tests drive partial
//! registrations without a live database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{PrimaryStore, PrimaryStoreError, SecondaryStore, SecondaryStoreError};
use crate::domain::{Account, AccountId, NewAccount, NewUser, User, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct PrimaryTables {
    users: HashMap<UserId, User>,
    accounts: Vec<Account>,
}

/// Primary store held in process memory.
#[derive(Default)]
pub struct InMemoryPrimaryStore {
    tables: Mutex<PrimaryTables>,
    unavailable: AtomicBool,
}

impl InMemoryPrimaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every operation fails with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of accounts currently owned by `user_id`.
    pub fn account_count(&self, user_id: &UserId) -> usize {
        lock(&self.tables)
            .accounts
            .iter()
            .filter(|account| account.user_id() == user_id)
            .count()
    }

    fn check_available(&self) -> Result<(), PrimaryStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PrimaryStoreError::connection("in-memory primary store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl PrimaryStore for InMemoryPrimaryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, PrimaryStoreError> {
        self.check_available()?;
        let stored = User::from_new(UserId::random(), user);
        lock(&self.tables)
            .users
            .insert(stored.id().clone(), stored.clone());
        Ok(stored)
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, PrimaryStoreError> {
        self.check_available()?;
        Ok(lock(&self.tables).users.get(id).cloned())
    }

    async fn accounts_for_user(&self, user_id: &UserId) -> Result<Vec<Account>, PrimaryStoreError> {
        self.check_available()?;
        Ok(lock(&self.tables)
            .accounts
            .iter()
            .filter(|account| account.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn insert_account(
        &self,
        account: NewAccount,
        limit: usize,
    ) -> Result<Account, PrimaryStoreError> {
        self.check_available()?;
        let mut tables = lock(&self.tables);
        let owner = account.user_id().clone();
        if !tables.users.contains_key(&owner) {
            return Err(PrimaryStoreError::unknown_user(owner.as_ref()));
        }
        let owned = tables
            .accounts
            .iter()
            .filter(|existing| existing.user_id() == &owner)
            .count();
        if owned >= limit {
            return Err(PrimaryStoreError::account_limit_reached(owner.as_ref(), limit));
        }

        let stored = Account::from_new(AccountId::random(), account);
        tables.accounts.push(stored.clone());
        Ok(stored)
    }

    async fn find_user_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<User>, PrimaryStoreError> {
        self.check_available()?;
        let tables = lock(&self.tables);
        Ok(tables
            .accounts
            .iter()
            .find(|account| account.id() == account_id)
            .and_then(|account| tables.users.get(account.user_id()))
            .cloned())
    }
}

/// Secondary store held in process memory.
#[derive(Default)]
pub struct InMemorySecondaryStore {
    documents: Mutex<HashMap<UserId, User>>,
    fail_inserts: AtomicBool,
    reported_key: Mutex<Option<String>>,
}

impl InMemorySecondaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, inserts fail with a connection error and store nothing.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make inserts acknowledge `key` instead of the identifier written.
    ///
    /// The document is still stored, as a real driver would have written it.
    pub fn report_inserted_key(&self, key: impl Into<String>) {
        *lock(&self.reported_key) = Some(key.into());
    }

    pub fn document_count(&self) -> usize {
        lock(&self.documents).len()
    }
}

#[async_trait]
impl SecondaryStore for InMemorySecondaryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, SecondaryStoreError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(SecondaryStoreError::connection(
                "in-memory secondary store rejected the write",
            ));
        }
        let stored = User::from_new(UserId::random(), user);
        lock(&self.documents).insert(stored.id().clone(), stored.clone());
        if let Some(reported) = lock(&self.reported_key).clone() {
            return Err(SecondaryStoreError::integrity_violation(
                stored.id().as_ref(),
                reported,
            ));
        }
        Ok(stored)
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, SecondaryStoreError> {
        Ok(lock(&self.documents).get(id).cloned())
    }
}
