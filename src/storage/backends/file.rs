use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, trace};

use super::Persister;
use crate::errors::{Result, TinylinkError};
use crate::storage::models::Database;

/// Whole-document JSON file.
///
/// Saves go to `<file>.tmp` first and are renamed over the target, so a crash
/// mid-write leaves the previous document in place.
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "database.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl Persister for JsonFilePersister {
    async fn load(&self) -> Result<Option<Database>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Data file {} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(TinylinkError::file_operation(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let db = serde_json::from_str::<Database>(&content).map_err(|e| {
            TinylinkError::serialization(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })?;

        trace!("Loaded {} records from {}", db.len(), self.path.display());
        Ok(Some(db))
    }

    async fn save(&self, db: &Database) -> Result<()> {
        let json = serde_json::to_string_pretty(db)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            TinylinkError::file_operation(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            TinylinkError::file_operation(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        trace!("Saved {} records to {}", db.len(), self.path.display());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn location(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }
}
