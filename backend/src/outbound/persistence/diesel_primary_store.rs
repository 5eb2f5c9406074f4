//! PostgreSQL-backed `PrimaryStore` implementation using Diesel.
//!
//! Identifiers are generated here at insert time. Account inserts run in a
//! transaction that locks the owning user row, so concurrent inserts for the
//! same user observe each other's counts.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{PrimaryStore, PrimaryStoreError};
use crate::domain::{Account, AccountId, NewAccount, NewUser, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{accounts, users};

/// Diesel-backed implementation of the `PrimaryStore` port.
#[derive(Clone)]
pub struct DieselPrimaryStore {
    pool: DbPool,
}

impl DieselPrimaryStore {
    /// Wrap a connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Result of the locked check-and-insert transaction.
enum AccountInsertOutcome {
    Inserted,
    UnknownUser,
    LimitReached,
}

fn row_to_user(row: UserRow) -> Result<User, PrimaryStoreError> {
    User::from_stored(row.id, row.name, row.address, row.email)
        .map_err(|err| PrimaryStoreError::query(format!("stored user row is invalid: {err}")))
}

fn row_to_account(row: AccountRow) -> Result<Account, PrimaryStoreError> {
    Account::from_stored(row.id, row.msisdn, row.user_id)
        .map_err(|err| PrimaryStoreError::query(format!("stored account row is invalid: {err}")))
}

#[async_trait]
impl PrimaryStore for DieselPrimaryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, PrimaryStoreError> {
        let id = UserId::random();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: id.as_ref(),
            name: user.name(),
            address: user.address(),
            email: user.email(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(User::from_new(id, user))
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, PrimaryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn accounts_for_user(&self, user_id: &UserId) -> Result<Vec<Account>, PrimaryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AccountRow> = accounts::table
            .filter(accounts::user_id.eq(user_id.as_ref()))
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_account).collect()
    }

    async fn insert_account(
        &self,
        account: NewAccount,
        limit: usize,
    ) -> Result<Account, PrimaryStoreError> {
        let id = AccountId::random();
        let limit_rows = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAccountRow {
            id: id.as_ref(),
            msisdn: account.msisdn(),
            user_id: account.user_id().as_ref(),
        };
        let owner = account.user_id().as_ref();

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let locked: Option<String> = users::table
                        .filter(users::id.eq(owner))
                        .select(users::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(AccountInsertOutcome::UnknownUser);
                    }

                    let owned: i64 = accounts::table
                        .filter(accounts::user_id.eq(owner))
                        .count()
                        .get_result(conn)
                        .await?;
                    if owned >= limit_rows {
                        return Ok(AccountInsertOutcome::LimitReached);
                    }

                    diesel::insert_into(accounts::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(AccountInsertOutcome::Inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        drop(conn);

        match outcome {
            AccountInsertOutcome::Inserted => Ok(Account::from_new(id, account)),
            AccountInsertOutcome::UnknownUser => Err(PrimaryStoreError::unknown_user(owner)),
            AccountInsertOutcome::LimitReached => {
                Err(PrimaryStoreError::account_limit_reached(owner, limit))
            }
        }
    }

    async fn find_user_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<User>, PrimaryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = accounts::table
            .inner_join(users::table)
            .filter(accounts::id.eq(account_id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn blank_stored_user_id_is_a_query_error() {
        let row = UserRow {
            id: String::new(),
            name: "Ann".to_owned(),
            address: "1 Oak St".to_owned(),
            email: "ann@x.com".to_owned(),
        };

        assert!(matches!(
            row_to_user(row),
            Err(PrimaryStoreError::Query { .. })
        ));
    }

    #[rstest]
    fn account_rows_keep_owner_reference() {
        let row = AccountRow {
            id: "a-1".to_owned(),
            msisdn: "555-0100".to_owned(),
            user_id: "u-1".to_owned(),
        };

        let account = row_to_account(row).expect("valid row");
        assert_eq!(account.user_id().as_ref(), "u-1");
        assert_eq!(account.msisdn(), "555-0100");
    }
}
