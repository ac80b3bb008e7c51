use serde::{Deserialize, Serialize};
use std::fmt;

/// Error surfaced by storage operations.
///
/// "Not found" is never an error: lookups report absence through their
/// return value. This type only covers failures of the backing store
/// itself (connectivity, duplicate keys, malformed documents).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageError {
    pub error: String,
    pub error_description: Option<String>,
}

impl StorageError {
    pub fn new(error: &str, description: Option<&str>) -> Self {
        Self {
            error: error.to_string(),
            error_description: description.map(|s| s.to_string()),
        }
    }

    pub fn server_error(description: &str) -> Self {
        Self::new("server_error", Some(description))
    }

    pub fn duplicate_key(description: &str) -> Self {
        Self::new("duplicate_key", Some(description))
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {:?}", self.error, self.error_description)
    }
}

impl std::error::Error for StorageError {}
