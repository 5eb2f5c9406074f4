//! Tests for user identifiers, registration input, and serialisation.

use super::*;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" abc", UserValidationError::InvalidId)]
#[case("abc\n", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] input: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(input), Err(expected));
}

#[rstest]
fn user_id_accepts_opaque_text() {
    let id = UserId::new("legacy-key-7").expect("opaque id");
    assert_eq!(id.as_ref(), "legacy-key-7");
}

#[rstest]
fn random_ids_are_distinct_uuids() {
    let first = UserId::random();
    let second = UserId::random();
    assert_ne!(first, second);
    assert!(uuid::Uuid::parse_str(first.as_ref()).is_ok());
}

#[rstest]
#[case("", "1 Oak St", "ann@x.com", UserValidationError::EmptyName)]
#[case("Ann", "  ", "ann@x.com", UserValidationError::EmptyAddress)]
#[case("Ann", "1 Oak St", "", UserValidationError::EmptyEmail)]
fn new_user_requires_populated_fields(
    #[case] name: &str,
    #[case] address: &str,
    #[case] email: &str,
    #[case] expected: UserValidationError,
) {
    assert_eq!(NewUser::try_new(name, address, email), Err(expected));
}

#[rstest]
fn user_serialises_with_flat_fields() {
    let new_user = NewUser::try_new("Ann", "1 Oak St", "ann@x.com").expect("valid user");
    let user = User::from_new(UserId::new("u-1").expect("id"), new_user);

    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({"id": "u-1", "name": "Ann", "address": "1 Oak St", "email": "ann@x.com"})
    );
}

#[rstest]
fn registered_user_uses_store_named_keys() {
    let primary = User::from_stored("p-1", "Ann", "1 Oak St", "ann@x.com").expect("user");
    let secondary = User::from_stored("s-1", "Ann", "1 Oak St", "ann@x.com").expect("user");
    let value = serde_json::to_value(RegisteredUser { primary, secondary }).expect("serialise");

    assert_eq!(value["userMysql"]["id"], Value::from("p-1"));
    assert_eq!(value["userMongo"]["id"], Value::from("s-1"));
}
