//! Storage: opaque key-value backends and workout history persistence.

pub mod keyvalue;
pub mod persistence;

pub use keyvalue::{get_data_dir, FileStorage, MemoryStorage, StorageService};
pub use persistence::{PersistenceGateway, FORMAT_VERSION, STORAGE_KEY};
