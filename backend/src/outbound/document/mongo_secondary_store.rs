//! MongoDB-backed `SecondaryStore` implementation.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::{Bson, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

use crate::domain::ports::{SecondaryStore, SecondaryStoreError};
use crate::domain::{NewUser, User, UserId};

use super::client::DocumentStore;
use super::documents::{USER_COLLECTION, UserDocument};

/// Secondary store adapter writing to the `user` collection.
#[derive(Clone, Debug)]
pub struct MongoSecondaryStore {
    users: Collection<UserDocument>,
}

impl MongoSecondaryStore {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            users: store.database().collection(USER_COLLECTION),
        }
    }
}

fn map_mongo_error(error: MongoError) -> SecondaryStoreError {
    debug!(error = %error, "mongodb operation failed");
    match *error.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Authentication { .. } => SecondaryStoreError::connection(error.to_string()),
        _ => SecondaryStoreError::query(error.to_string()),
    }
}

/// Confirm the acknowledged key is the identifier that was written.
fn verify_inserted_id(expected: &UserId, inserted: &Bson) -> Result<(), SecondaryStoreError> {
    match inserted {
        Bson::String(actual) if actual == expected.as_ref() => Ok(()),
        Bson::String(actual) => Err(SecondaryStoreError::integrity_violation(
            expected.as_ref(),
            actual.as_str(),
        )),
        other => Err(SecondaryStoreError::integrity_violation(
            expected.as_ref(),
            other.to_string(),
        )),
    }
}

#[async_trait]
impl SecondaryStore for MongoSecondaryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, SecondaryStoreError> {
        let id = UserId::random();
        let document = UserDocument::from_new(&id, &user);

        let result = self
            .users
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;
        verify_inserted_id(&id, &result.inserted_id)?;

        Ok(User::from_new(id, user))
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, SecondaryStoreError> {
        let found = self
            .users
            .find_one(doc! { "_id": id.as_ref() })
            .await
            .map_err(map_mongo_error)?;

        found
            .map(|document| {
                User::try_from(document).map_err(|err| {
                    SecondaryStoreError::query(format!("stored user document is invalid: {err}"))
                })
            })
            .transpose()
    }
}
