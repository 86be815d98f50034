//! # Formats Module
//!
//! Import and export of single character profiles.
//!
//! This module contains:
//! - JSON export (pretty-printed object) and import (defaults backfilled)
//! - Markdown export (the rendered description)
//! - Download file naming
//!
//! Note: File I/O operations remain in the app layer (apps/charforge).
//! This module only handles format conversion (pure transformations).

mod exchange;

pub use exchange::*;
