//! FedClient State - explicitly scoped client state
//!
//! Each concern gets its own typed store with an explicit initialization
//! and teardown point. Asynchronous results are bound to the view that
//! requested them through [`ViewToken`]s.

pub mod lifetime;
pub mod store;

pub use lifetime::{LoadState, ViewKind, ViewLifetime, ViewToken};
pub use store::{ClientIdentity, StoreError, TypedStore};
