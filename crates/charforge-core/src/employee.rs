//! # Employee Records
//!
//! The employee entity: four bounded strings behind a store-assigned id.
//!
//! | Field      | Required | Max chars |
//! |------------|----------|-----------|
//! | `name`     | yes      | 100       |
//! | `email`    | yes      | 100       |
//! | `phone`    | no       | 15        |
//! | `position` | no       | 50        |
//!
//! Lengths are counted in characters, not bytes.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 15;
pub const MAX_POSITION_LEN: usize = 50;

/// Store-assigned employee identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The editable fields of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl EmployeeRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            position: None,
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Trimmed copy; blank optional fields become `None`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: trimmed_optional(self.phone.as_deref()),
            position: trimmed_optional(self.position.as_deref()),
        }
    }

    /// Check the required and length constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("Name", &self.name)?;
        bounded("Name", &self.name, MAX_NAME_LEN)?;
        required("Email", &self.email)?;
        bounded("Email", &self.email, MAX_EMAIL_LEN)?;
        if let Some(phone) = &self.phone {
            bounded("Phone", phone, MAX_PHONE_LEN)?;
        }
        if let Some(position) = &self.position {
            bounded("Position", position, MAX_POSITION_LEN)?;
        }
        Ok(())
    }
}

/// A stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub record: EmployeeRecord,
}

fn trimmed_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}
