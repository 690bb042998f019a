use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::backends::Persister;
use super::models::Database;
use crate::errors::Result;

/// In-memory link/stats maps with a persistence backend.
///
/// Every mutation runs under the write guard and the guard is held until the
/// snapshot has been handed to the persister, so writers are serialized and
/// the file always reflects a complete sequence of mutations.
pub struct LinkStore {
    db: RwLock<Database>,
    persister: Arc<dyn Persister>,
}

impl LinkStore {
    /// Load the store from its backend.
    ///
    /// - nothing stored yet: start empty and write the empty document
    /// - unreadable or unparsable data: log and start empty
    pub async fn open(persister: Arc<dyn Persister>) -> Self {
        let db = match persister.load().await {
            Ok(Some(mut db)) => {
                let (created, dropped) = db.repair_pairs();
                if created > 0 {
                    warn!("Created missing stats for {} short codes", created);
                }
                if dropped > 0 {
                    warn!("Dropped {} stats entries without a URL record", dropped);
                }
                info!("Database loaded: {} short links", db.len());
                db
            }
            Ok(None) => {
                let db = Database::default();
                match persister.save(&db).await {
                    Ok(()) => info!("Database created"),
                    Err(e) => error!("Failed to create database: {}", e),
                }
                db
            }
            Err(e) => {
                error!("Failed to load database, starting empty: {}", e);
                Database::default()
            }
        };

        Self::with_database(db, persister)
    }

    /// Wrap an existing snapshot without touching the backend
    pub fn with_database(db: Database, persister: Arc<dyn Persister>) -> Self {
        Self {
            db: RwLock::new(db),
            persister,
        }
    }

    pub async fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        let guard = self.db.read().await;
        f(&guard)
    }

    /// Apply `f` and persist the result.
    ///
    /// When `f` fails nothing is persisted and the error is returned. A failed
    /// save is logged only: the in-memory change stands and the next successful
    /// save writes it out.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut Database) -> Result<R>) -> Result<R> {
        let mut guard = self.db.write().await;
        let out = f(&mut guard)?;

        if let Err(e) = self.persister.save(&guard).await {
            error!("Failed to save database: {}", e);
        }

        Ok(out)
    }

    pub async fn snapshot(&self) -> Database {
        self.db.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.db.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.db.read().await.is_empty()
    }

    pub fn backend_name(&self) -> &'static str {
        self.persister.backend_name()
    }

    pub fn location(&self) -> Option<String> {
        self.persister.location()
    }
}
