//! JSON persistence for the registry and search history.
//!
//! # Responsibility
//! - Serialize the registry's canonical contents to flat JSON records.
//! - Re-validate everything on load; a reload never bypasses the model's
//!   construction rules or the registry's invariants.
//!
//! # Invariants
//! - Serialize then deserialize reproduces an equal registry.
//! - A missing file is not an error; a malformed one is.

use crate::registry::RegistryError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod registry_store;
pub mod search_history;

pub use registry_store::{load_registry, save_registry};
pub use search_history::{load_search_history, save_search_history};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing a data file.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Persisted value fails model validation.
    InvalidData(String),
    /// Persisted collections violate a registry invariant.
    Registry(RegistryError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RegistryError> for StorageError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}
