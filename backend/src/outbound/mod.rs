//! Outbound adapters implementing the store ports.
//!
//! - **persistence**: PostgreSQL primary store via Diesel
//! - **document**: MongoDB secondary store
//! - **memory**: in-process stores for tests (`test-support` feature)
//!
//! Adapters translate between domain types and storage representations and
//! carry no business rules beyond the atomic account-limit check.

pub mod document;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod persistence;
