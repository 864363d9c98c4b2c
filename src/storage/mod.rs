pub mod json_store;
pub mod profile;

use crate::errors::CoachError;

pub use json_store::JsonFileStore;
pub use profile::{keys, ProfileState};

pub type Result<T> = std::result::Result<T, CoachError>;

/// Minimal key-value snapshot store. The core has no opinion on the storage
/// medium; the host supplies an implementation. Corruption or absence of one
/// key must not block loading the others.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
