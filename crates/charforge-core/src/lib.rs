//! # Charforge Core
//!
//! The logic behind the Charforge character workbench and the employee
//! record store.
//!
//! This crate contains:
//! - The character profile model (`profile`)
//! - The Markdown description template (`description`) and speaking-style
//!   dialogue templates (`dialogue`)
//! - Random content generators over fixed candidate lists (`generator`)
//! - JSON / Markdown import and export (`formats`)
//! - Local key/value storage, the saved-profile list and the employee
//!   repository (`storage`)
//! - The in-memory editing session (`workbench`)
//!
//! Note: no async, no network. The HTTP surface lives in `apps/charforge`.

pub mod description;
pub mod dialogue;
pub mod employee;
pub mod error;
pub mod formats;
pub mod generator;
pub mod profile;
pub mod storage;
pub mod workbench;

pub use description::describe;
pub use employee::{Employee, EmployeeId, EmployeeRecord};
pub use error::{CoreError, FormatError, Result, StoreError, ValidationError};
pub use generator::ProfileGenerator;
pub use profile::{
    CharacterProfile, Gender, KeywordField, PersonalityType, ProfileKey, Profession, Race,
    VoiceType,
};
pub use storage::{
    DeleteOutcome, EmployeeRepository, LocalStorage, MemoryStorage, ProfileStore, RedbStorage,
    SaveOutcome,
};
pub use workbench::Workbench;
