//! Account data model.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::{UserId, UserValidationError};

/// Maximum number of accounts a single user may own.
pub const ACCOUNT_LIMIT: usize = 3;

/// Validation errors returned by the account constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error("account id must not be empty")]
    EmptyId,
    #[error("account id must not contain surrounding whitespace")]
    InvalidId,
    #[error("msisdn must not be empty")]
    EmptyMsisdn,
    #[error("userID must not be empty")]
    EmptyUserId,
    #[error("userID must not contain surrounding whitespace")]
    InvalidUserId,
}

fn owner_id(user_id: impl AsRef<str>) -> Result<UserId, AccountValidationError> {
    UserId::new(user_id).map_err(|err| match err {
        UserValidationError::EmptyId => AccountValidationError::EmptyUserId,
        _ => AccountValidationError::InvalidUserId,
    })
}

/// Opaque account identifier assigned by the primary store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validate and construct an [`AccountId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(AccountValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(AccountValidationError::InvalidId);
        }
        Ok(Self(id.to_owned()))
    }

    /// Generate a new random identifier (UUID v4 text).
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

/// Registration input for an account owned by an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    msisdn: String,
    user_id: UserId,
}

impl NewAccount {
    /// Validate the phone number and owning user reference.
    pub fn try_new(
        msisdn: impl Into<String>,
        user_id: impl AsRef<str>,
    ) -> Result<Self, AccountValidationError> {
        let msisdn = msisdn.into();
        if msisdn.trim().is_empty() {
            return Err(AccountValidationError::EmptyMsisdn);
        }
        let user_id = owner_id(user_id)?;
        Ok(Self { msisdn, user_id })
    }

    /// Subscriber phone number.
    pub fn msisdn(&self) -> &str {
        &self.msisdn
    }

    /// Owning user in the primary store.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// An account as stored by the primary store.
///
/// Serialises as `{"id", "msisdn", "userID"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    msisdn: String,
    #[serde(rename = "userID")]
    user_id: UserId,
}

impl Account {
    /// Attach a store-issued identifier to registration input.
    pub fn from_new(id: AccountId, new_account: NewAccount) -> Self {
        Self {
            id,
            msisdn: new_account.msisdn,
            user_id: new_account.user_id,
        }
    }

    /// Rebuild an account from stored columns.
    pub fn from_stored(
        id: impl AsRef<str>,
        msisdn: impl Into<String>,
        user_id: impl AsRef<str>,
    ) -> Result<Self, AccountValidationError> {
        Ok(Self {
            id: AccountId::new(id)?,
            msisdn: msisdn.into(),
            user_id: owner_id(user_id)?,
        })
    }

    /// Store-issued account identifier.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Subscriber phone number.
    pub fn msisdn(&self) -> &str {
        &self.msisdn
    }

    /// Owning user in the primary store.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", "u-1", AccountValidationError::EmptyMsisdn)]
    #[case("  ", "u-1", AccountValidationError::EmptyMsisdn)]
    #[case("555-0100", "", AccountValidationError::EmptyUserId)]
    #[case("555-0100", " u-1", AccountValidationError::InvalidUserId)]
    fn new_account_validates_fields(
        #[case] msisdn: &str,
        #[case] user_id: &str,
        #[case] expected: AccountValidationError,
    ) {
        assert_eq!(NewAccount::try_new(msisdn, user_id), Err(expected));
    }

    #[rstest]
    fn account_serialises_owner_as_user_id_key() {
        let new_account = NewAccount::try_new("555-0100", "u-1").expect("valid account");
        let account = Account::from_new(AccountId::new("a-1").expect("id"), new_account);

        assert_eq!(
            serde_json::to_value(&account).expect("serialise account"),
            json!({"id": "a-1", "msisdn": "555-0100", "userID": "u-1"})
        );
    }

    #[rstest]
    fn stored_padded_owner_is_invalid_not_empty() {
        let err = Account::from_stored("a-1", "555-0100", "u-1 ").expect_err("padded owner");

        assert_eq!(err, AccountValidationError::InvalidUserId);
        assert_eq!(
            err.to_string(),
            "userID must not contain surrounding whitespace"
        );
    }

    #[rstest]
    fn account_ids_reject_padding() {
        assert_eq!(
            AccountId::new(" a-1 "),
            Err(AccountValidationError::InvalidId)
        );
    }
}
