//! User data model.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    EmptyAddress,
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain surrounding whitespace"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyAddress => write!(f, "address must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque user identifier assigned by a store at insert time.
///
/// Store adapters mint identifiers with [`UserId::random`]; values read back
/// from a store or a request path are wrapped with [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id.to_owned()))
    }

    /// Generate a new random identifier (UUID v4 text).
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

fn require_text(
    value: impl Into<String>,
    empty: UserValidationError,
) -> Result<String, UserValidationError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(empty);
    }
    Ok(value)
}

/// Registration input: the user fields a caller supplies.
///
/// ## Invariants
/// - `name`, `address` and `email` are non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    address: String,
    email: String,
}

impl NewUser {
    /// Fallible constructor enforcing the non-blank field invariant.
    pub fn try_new(
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: require_text(name, UserValidationError::EmptyName)?,
            address: require_text(address, UserValidationError::EmptyAddress)?,
            email: require_text(email, UserValidationError::EmptyEmail)?,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A user as stored by one of the datastores.
///
/// Serialises as `{"id", "name", "address", "email"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    address: String,
    email: String,
}

impl User {
    /// Attach a store-issued identifier to registration input.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            name,
            address,
            email,
        } = new_user;
        Self {
            id,
            name,
            address,
            email,
        }
    }

    /// Rebuild a user from stored columns or document fields.
    ///
    /// Stored values are trusted apart from the identifier, which must still
    /// be non-empty.
    pub fn from_stored(
        id: impl AsRef<str>,
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            id: UserId::new(id)?,
            name: name.into(),
            address: address.into(),
            email: email.into(),
        })
    }

    /// Store-issued identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Composite result of a dual-write registration.
///
/// Each copy carries the identifier its own store assigned; the two are not
/// required to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUser {
    #[serde(rename = "userMysql")]
    pub primary: User,
    #[serde(rename = "userMongo")]
    pub secondary: User,
}

#[cfg(test)]
mod tests;
