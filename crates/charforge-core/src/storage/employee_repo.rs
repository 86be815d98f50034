//! Employee repository over redb.
//!
//! Records are postcard-encoded under their id. The next id lives in a
//! metadata table so ids keep increasing across deletes and restarts.

use crate::employee::{Employee, EmployeeId, EmployeeRecord};
use crate::error::{Result, StoreError};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Employee id -> postcard-encoded [`EmployeeRecord`].
const EMPLOYEES: TableDefinition<u64, &[u8]> = TableDefinition::new("employees");

/// Repository metadata (`next_id`).
const EMPLOYEE_META: TableDefinition<&str, u64> = TableDefinition::new("employee_meta");

const NEXT_ID_KEY: &str = "next_id";
const FIRST_ID: u64 = 1;

/// Create/read/update/delete access to employee records.
#[derive(Clone)]
pub struct EmployeeRepository {
    db: Arc<Database>,
}

impl std::fmt::Debug for EmployeeRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeRepository")
            .field("table", &"employees")
            .finish_non_exhaustive()
    }
}

impl EmployeeRepository {
    /// Use an already opened database, creating the tables if needed.
    pub fn new(db: Arc<Database>) -> std::result::Result<Self, StoreError> {
        let txn = db.begin_write()?;
        txn.open_table(EMPLOYEES)?;
        txn.open_table(EMPLOYEE_META)?;
        txn.commit()?;
        Ok(Self { db })
    }

    /// Open (or create) a database file for the repository alone.
    pub fn open(path: &Path) -> std::result::Result<Self, StoreError> {
        Self::new(super::open_database(path)?)
    }

    /// Validate and insert a new employee under a fresh id.
    pub fn create(&self, record: EmployeeRecord) -> Result<Employee> {
        let record = record.normalized();
        record.validate()?;
        let id = self.insert_new(&postcard::to_allocvec(&record).map_err(StoreError::from)?)?;
        tracing::info!(id = id.0, "employee created");
        Ok(Employee { id, record })
    }

    /// The employee with `id`, if present.
    pub fn get(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let txn = self.db.begin_read().map_err(StoreError::from)?;
        let table = txn.open_table(EMPLOYEES).map_err(StoreError::from)?;
        let Some(guard) = table.get(id.0).map_err(StoreError::from)? else {
            return Ok(None);
        };
        let record = decode(guard.value())?;
        Ok(Some(Employee { id, record }))
    }

    /// Every employee, ascending by id.
    pub fn list(&self) -> Result<Vec<Employee>> {
        let txn = self.db.begin_read().map_err(StoreError::from)?;
        let table = txn.open_table(EMPLOYEES).map_err(StoreError::from)?;
        let mut employees = Vec::new();
        for entry in table.iter().map_err(StoreError::from)? {
            let (key, value) = entry.map_err(StoreError::from)?;
            employees.push(Employee {
                id: EmployeeId(key.value()),
                record: decode(value.value())?,
            });
        }
        Ok(employees)
    }

    /// Replace every field of an existing employee.
    ///
    /// Returns `None` when `id` does not exist.
    pub fn update(&self, id: EmployeeId, record: EmployeeRecord) -> Result<Option<Employee>> {
        let record = record.normalized();
        record.validate()?;
        let bytes = postcard::to_allocvec(&record).map_err(StoreError::from)?;
        if !self.replace_existing(id, &bytes)? {
            return Ok(None);
        }
        tracing::info!(id = id.0, "employee updated");
        Ok(Some(Employee { id, record }))
    }

    /// Remove an employee. Returns whether it existed.
    pub fn delete(&self, id: EmployeeId) -> Result<bool> {
        let removed = self.remove(id)?;
        if removed {
            tracing::info!(id = id.0, "employee deleted");
        }
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------

    fn insert_new(&self, bytes: &[u8]) -> std::result::Result<EmployeeId, StoreError> {
        let txn = self.db.begin_write()?;
        let id = {
            let mut meta = txn.open_table(EMPLOYEE_META)?;
            let id = meta.get(NEXT_ID_KEY)?.map_or(FIRST_ID, |guard| guard.value());
            meta.insert(NEXT_ID_KEY, id.saturating_add(1))?;

            let mut employees = txn.open_table(EMPLOYEES)?;
            employees.insert(id, bytes)?;
            id
        };
        txn.commit()?;
        Ok(EmployeeId(id))
    }

    fn replace_existing(
        &self,
        id: EmployeeId,
        bytes: &[u8],
    ) -> std::result::Result<bool, StoreError> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut employees = txn.open_table(EMPLOYEES)?;
            let existed = employees.get(id.0)?.is_some();
            if existed {
                employees.insert(id.0, bytes)?;
            }
            existed
        };
        if existed {
            txn.commit()?;
        } else {
            txn.abort()?;
        }
        Ok(existed)
    }

    fn remove(&self, id: EmployeeId) -> std::result::Result<bool, StoreError> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut employees = txn.open_table(EMPLOYEES)?;
            employees.remove(id.0)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }
}

fn decode(bytes: &[u8]) -> Result<EmployeeRecord> {
    Ok(postcard::from_bytes(bytes).map_err(StoreError::from)?)
}

// =============================================================================
// TESTS
// =============================================================================
