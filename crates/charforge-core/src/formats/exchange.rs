//! JSON and Markdown conversion for a single profile.

use crate::description::describe;
use crate::error::FormatError;
use crate::profile::CharacterProfile;
use serde_json::Value;

/// File stem used when a profile has no name.
pub const FALLBACK_FILE_STEM: &str = "character";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }

    /// MIME type of the exported document.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

/// Serialize `profile` as a pretty-printed JSON object.
pub fn export_json(profile: &CharacterProfile) -> Result<String, FormatError> {
    serde_json::to_string_pretty(profile).map_err(FormatError::Serialize)
}

/// Render `profile` as a Markdown character sheet.
#[must_use]
pub fn export_markdown(profile: &CharacterProfile) -> String {
    describe(profile)
}

/// Export `profile` in `format`.
pub fn export(profile: &CharacterProfile, format: ExportFormat) -> Result<String, FormatError> {
    match format {
        ExportFormat::Json => export_json(profile),
        ExportFormat::Markdown => Ok(export_markdown(profile)),
    }
}

/// Parse one profile from JSON text.
///
/// Requires a non-blank `name` and an `age`; every other absent field takes
/// its default value. Never panics on malformed input.
pub fn import_json(text: &str) -> Result<CharacterProfile, FormatError> {
    let value: Value = serde_json::from_str(text).map_err(FormatError::InvalidJson)?;
    let Some(object) = value.as_object() else {
        return Err(FormatError::NotAnObject);
    };

    let has_name = object
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(FormatError::MissingField("name"));
    }
    if object.get("age").is_none_or(Value::is_null) {
        return Err(FormatError::MissingField("age"));
    }

    serde_json::from_value(value).map_err(FormatError::InvalidField)
}

/// Download file name for `profile`: `{name}.{ext}`.
///
/// The name is reduced to a single relative path component. Separators and
/// control characters become `_` and leading dots are dropped, so the result
/// can be joined onto a directory without leaving it.
#[must_use]
pub fn export_file_name(profile: &CharacterProfile, format: ExportFormat) -> String {
    let stem = file_stem(&profile.name);
    let stem = if stem.is_empty() {
        FALLBACK_FILE_STEM
    } else {
        stem.as_str()
    };
    format!("{stem}.{}", format.extension())
}

fn file_stem(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    replaced.trim_start_matches('.').trim().to_string()
}

// =============================================================================
// TESTS
// =============================================================================
