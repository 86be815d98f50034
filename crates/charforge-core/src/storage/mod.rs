//! # Storage Module
//!
//! Persistence for saved profiles and employee records.
//!
//! - `LocalStorage`: string key/value storage modelled on the browser API,
//!   with an in-memory backend and a redb backend
//! - `ProfileStore`: the saved-profile list, a JSON array under one key
//! - `EmployeeRepository`: create/read/update/delete over a redb table
//!
//! redb gives ACID transactions and crash safety; both redb-backed types
//! share one `Database` handle.

mod employee_repo;
mod local;
mod profile_store;
mod redb_storage;

pub use employee_repo::EmployeeRepository;
pub use local::{LocalStorage, MemoryStorage};
pub use profile_store::{DEFAULT_STORAGE_KEY, DeleteOutcome, ProfileStore, SaveOutcome};
pub use redb_storage::RedbStorage;

use crate::error::StoreError;
use redb::Database;
use std::path::Path;
use std::sync::Arc;

/// Open (or create) the database file at `path`.
///
/// Missing parent directories are created.
pub fn open_database(path: &Path) -> Result<Arc<Database>, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::create(path)?;
    tracing::debug!(path = %path.display(), "opened database");
    Ok(Arc::new(db))
}
