//! BSON document shapes stored in the `user` collection.

use serde::{Deserialize, Serialize};

use crate::domain::{NewUser, User, UserId, UserValidationError};

/// Collection holding user documents.
pub(crate) const USER_COLLECTION: &str = "user";

/// Stored form of a user, keyed by `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub email: String,
}

impl UserDocument {
    pub(crate) fn from_new(id: &UserId, user: &NewUser) -> Self {
        Self {
            id: id.as_ref().to_owned(),
            name: user.name().to_owned(),
            address: user.address().to_owned(),
            email: user.email().to_owned(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDocument) -> Result<Self, Self::Error> {
        User::from_stored(value.id, value.name, value.address, value.email)
    }
}
