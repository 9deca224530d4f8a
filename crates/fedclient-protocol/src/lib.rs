//! FedClient Protocol - backend wire types and endpoint definitions
//!
//! Describes the JSON emitted by the federated-learning backend for
//! completed training sessions and their per-round test results.

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::*;
pub use types::*;
