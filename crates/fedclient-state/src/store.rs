use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store '{0}' is already initialized")]
    AlreadyInitialized(&'static str),
}

/// A single-concern store with explicit initialization and teardown.
///
/// Stores are owned values passed to whoever needs them; there is no
/// process-wide instance.
#[derive(Debug)]
pub struct TypedStore<T> {
    name: &'static str,
    value: Option<T>,
}

impl<T> TypedStore<T> {
    pub fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn initialize(&mut self, value: T) -> Result<(), StoreError> {
        if self.value.is_some() {
            return Err(StoreError::AlreadyInitialized(self.name));
        }
        tracing::debug!(store = self.name, "Store initialized");
        self.value = Some(value);
        Ok(())
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Release the stored value. The store may be initialized again afterwards.
    pub fn teardown(&mut self) -> Option<T> {
        let value = self.value.take();
        if value.is_some() {
            tracing::debug!(store = self.name, "Store torn down");
        }
        value
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }
}

/// Identity of this federated-learning client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

impl ClientIdentity {
    /// True when no identity field has been filled in yet.
    pub fn is_unregistered(&self) -> bool {
        self.client_id.is_empty() && self.client_name.is_empty()
    }
}
