pub mod backends;
pub mod models;
mod store;

pub use backends::{JsonFilePersister, NullPersister, Persister, PersisterFactory};
pub use models::{Database, StatsRecord, UrlRecord};
pub use store::LinkStore;
