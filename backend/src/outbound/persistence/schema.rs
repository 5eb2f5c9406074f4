//! Diesel table definitions for the primary store.
//!
//! These definitions must match `backend/schema/primary.sql`. Regenerate with
//! `diesel print-schema` when the SQL changes.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key: UUID v4 text generated by the service.
        id -> Varchar,
        name -> Text,
        address -> Text,
        email -> Text,
    }
}

diesel::table! {
    /// Accounts owned by users. A user owns at most three rows here.
    accounts (id) {
        /// Primary key: UUID v4 text generated by the service.
        id -> Varchar,
        /// Subscriber phone number.
        msisdn -> Text,
        /// Foreign key to `users.id`.
        user_id -> Varchar,
    }
}

diesel::joinable!(accounts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, users);
