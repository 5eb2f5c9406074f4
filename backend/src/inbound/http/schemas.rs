//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their
//! serialised shape so the inbound layer owns the framework concern.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Identifier assigned by the store that holds this copy.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ann")]
    name: String,
    #[schema(example = "1 Oak St")]
    address: String,
    #[schema(example = "ann@example.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::RegisteredUser`].
#[derive(ToSchema)]
#[schema(as = RegisteredUser)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RegisteredUserSchema {
    /// Copy held by the relational primary store.
    #[schema(rename = "userMysql")]
    user_mysql: UserSchema,
    /// Copy held by the document secondary store.
    #[schema(rename = "userMongo")]
    user_mongo: UserSchema,
}

/// OpenAPI schema for [`crate::domain::Account`].
#[derive(ToSchema)]
#[schema(as = Account)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AccountSchema {
    #[schema(example = "9b2f4c1e-7d1a-4a37-8f7c-2b1d3e5f6a70")]
    id: String,
    /// Subscriber phone number.
    #[schema(example = "15551230100")]
    msisdn: String,
    /// Owning user in the primary store.
    #[schema(rename = "userID", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user_id: String,
}
