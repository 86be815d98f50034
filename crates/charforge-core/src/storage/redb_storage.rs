//! redb-backed local storage.

use super::LocalStorage;
use crate::error::StoreError;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Key/value table holding local storage items.
const LOCAL_STORAGE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

/// Local storage persisted in a redb database file.
#[derive(Clone)]
pub struct RedbStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStorage")
            .field("table", &"local_storage")
            .finish_non_exhaustive()
    }
}

impl RedbStorage {
    /// Use an already opened database, creating the table if needed.
    pub fn new(db: Arc<Database>) -> Result<Self, StoreError> {
        let txn = db.begin_write()?;
        txn.open_table(LOCAL_STORAGE)?;
        txn.commit()?;
        Ok(Self { db })
    }

    /// Open (or create) a database file dedicated to local storage.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::new(super::open_database(path)?)
    }

    /// The shared database handle.
    #[must_use]
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}

impl LocalStorage for RedbStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(LOCAL_STORAGE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOCAL_STORAGE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOCAL_STORAGE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn update_item(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOCAL_STORAGE)?;
            let current = table.get(key)?.map(|guard| guard.value().to_string());
            if let Some(next) = apply(current.as_deref()) {
                table.insert(key, next.as_str())?;
            }
        }
        txn.commit()?;
        Ok(())
    }
}
