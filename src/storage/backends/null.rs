use async_trait::async_trait;
use tracing::debug;

use super::Persister;
use crate::errors::Result;
use crate::storage::models::Database;

/// Keeps nothing; the store lives only in memory.
pub struct NullPersister;

impl Default for NullPersister {
    fn default() -> Self {
        Self::new()
    }
}

impl NullPersister {
    pub fn new() -> Self {
        debug!("Using NullPersister: links will not survive a restart");
        NullPersister
    }
}

#[async_trait]
impl Persister for NullPersister {
    async fn load(&self) -> Result<Option<Database>> {
        Ok(None)
    }

    async fn save(&self, db: &Database) -> Result<()> {
        debug!("NullPersister.save called with {} records, nothing written", db.len());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
