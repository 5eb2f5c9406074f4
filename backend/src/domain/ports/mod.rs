//! Domain ports.
//!
//! Driven ports describe the stores the registry writes to. The driving
//! port describes what inbound adapters may ask of the domain.

mod macros;
mod primary_store;
mod secondary_store;
mod user_registry;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use primary_store::MockPrimaryStore;
pub use primary_store::{PrimaryStore, PrimaryStoreError};
#[cfg(test)]
pub use secondary_store::MockSecondaryStore;
pub use secondary_store::{SecondaryStore, SecondaryStoreError};
#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::UserRegistry;
