//! Persistence backends for the link store
//!
//! A backend only moves whole snapshots; all bookkeeping happens in
//! [`LinkStore`](super::LinkStore).

pub mod file;
pub mod null;

use std::sync::Arc;

use async_trait::async_trait;

use super::models::Database;
use crate::config::StorageConfig;
use crate::errors::{Result, TinylinkError};

pub use file::JsonFilePersister;
pub use null::NullPersister;

#[async_trait]
pub trait Persister: Send + Sync {
    /// Read the stored snapshot. `Ok(None)` means nothing has been stored yet.
    async fn load(&self) -> Result<Option<Database>>;

    /// Replace the stored snapshot with `db`.
    async fn save(&self, db: &Database) -> Result<()>;

    fn backend_name(&self) -> &'static str;

    /// Human readable location of the data, if any
    fn location(&self) -> Option<String> {
        None
    }
}

pub struct PersisterFactory;

impl PersisterFactory {
    pub fn create(config: &StorageConfig) -> Result<Arc<dyn Persister>> {
        match config.backend.as_str() {
            "file" => Ok(Arc::new(JsonFilePersister::new(&config.data_file))),
            "memory" | "null" => Ok(Arc::new(NullPersister::new())),
            other => Err(TinylinkError::config(format!(
                "Unknown storage backend: {}. Valid: file, memory",
                other
            ))),
        }
    }
}
