//! Integration tests for Charforge CLI commands.
//!
//! Uses tempfile for testing file-based operations.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use charforge::cli::{
    Cli, CliError, Command, Context, EmployeeArgs, FormatArg, ProfileForm, cmd_background, cmd_create,
    cmd_delete, cmd_describe, cmd_employee_add, cmd_employee_delete, cmd_employee_get,
    cmd_employee_list, cmd_employee_update, cmd_export, cmd_import, cmd_list, cmd_quotes,
    cmd_random, cmd_show, run,
};
use charforge::config::Config;
use charforge_core::generator::{MYSTERIOUS_BACKGROUNDS, QUOTE_PICKS, QUOTES};
use charforge_core::{CharacterProfile, EmployeeId, Race, SaveOutcome, describe};
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Open stores in a fresh database.
fn open_context(dir: &TempDir) -> Context {
    Context::open(&dir.path().join("charforge.redb"), "savedCharacters").unwrap()
}

/// Write a character JSON file.
fn create_character_json(dir: &TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, content).unwrap();
    path
}

fn aria_json() -> &'static str {
    r#"{
        "name": "Aria Nightshade",
        "age": 27,
        "race": "Elf",
        "profession": "Rogue",
        "birthplace": "Silverwood",
        "currentStanding": "Hunted by the guild she betrayed.",
        "personalityKeywords": ["sly", "", "loyal", "", ""]
    }"#
}

fn output_string(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

fn ada_args() -> EmployeeArgs {
    EmployeeArgs {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: None,
        position: Some("Analyst".to_string()),
    }
}

// =============================================================================
// CHARACTER COMMAND TESTS
// =============================================================================

#[test]
fn test_import_then_show() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let file = create_character_json(&temp, "aria.json", aria_json());

    let mut out = Vec::new();
    let outcome = cmd_import(&ctx, &file, &mut out).unwrap();
    assert_eq!(outcome, SaveOutcome::Inserted);
    assert!(output_string(out).contains("Saved 'Aria Nightshade'"));

    let mut out = Vec::new();
    cmd_show(&ctx, "Aria Nightshade", false, &mut out).unwrap();
    let shown = output_string(out);
    assert!(shown.starts_with("# Aria Nightshade"));
    assert!(shown.contains("## Current Situation"));
}

#[test]
fn test_import_twice_replaces() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let file = create_character_json(&temp, "aria.json", aria_json());

    cmd_import(&ctx, &file, &mut Vec::new()).unwrap();
    let outcome = cmd_import(&ctx, &file, &mut Vec::new()).unwrap();
    assert_eq!(outcome, SaveOutcome::Replaced);
    assert_eq!(ctx.profiles.load_all().len(), 1);
}

#[test]
fn test_import_rejects_malformed_json() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let file = create_character_json(&temp, "broken.json", "{ \"name\": ");

    let result = cmd_import(&ctx, &file, &mut Vec::new());
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::InvalidImport(_)));
    assert_eq!(err.to_string(), "Invalid character data format");
    assert!(ctx.profiles.load_all().is_empty());
}

#[test]
fn test_import_missing_file() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    let result = cmd_import(&ctx, &temp.path().join("missing.json"), &mut Vec::new());
    assert!(matches!(result, Err(CliError::Io { .. })));
}

#[test]
fn test_describe_prints_description() {
    let temp = create_temp_dir();
    let file = create_character_json(&temp, "aria.json", aria_json());

    let mut out = Vec::new();
    cmd_describe(&file, &mut out).unwrap();
    let text = output_string(out);
    assert!(text.contains("Aria Nightshade is a 27-year-old Other Elf Rogue."));
    assert!(text.contains("Aria Nightshade is sly, loyal."));
}

#[test]
fn test_export_json_to_directory() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let file = create_character_json(&temp, "aria.json", aria_json());
    cmd_import(&ctx, &file, &mut Vec::new()).unwrap();

    let export_dir = temp.path().join("exports");
    std::fs::create_dir(&export_dir).unwrap();
    cmd_export(
        &ctx,
        "Aria Nightshade",
        FormatArg::Json,
        Some(&export_dir),
        &mut Vec::new(),
    )
    .unwrap();

    let exported = std::fs::read_to_string(export_dir.join("Aria Nightshade.json")).unwrap();
    let reimported = charforge_core::formats::import_json(&exported).unwrap();
    assert_eq!(Some(reimported), ctx.profiles.get("Aria Nightshade"));
}

#[test]
fn test_export_to_directory_keeps_file_inside() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let file = create_character_json(&temp, "escape.json", r#"{"name": "../escaped", "age": 3}"#);
    cmd_import(&ctx, &file, &mut Vec::new()).unwrap();

    let export_dir = temp.path().join("exports");
    std::fs::create_dir(&export_dir).unwrap();
    cmd_export(
        &ctx,
        "../escaped",
        FormatArg::Json,
        Some(&export_dir),
        &mut Vec::new(),
    )
    .unwrap();

    assert!(!temp.path().join("escaped.json").exists());
    let written: Vec<PathBuf> = std::fs::read_dir(&export_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(written, vec![export_dir.join("_escaped.json")]);
}

#[tokio::test]
async fn test_describe_does_not_open_database() {
    let temp = create_temp_dir();
    let file = create_character_json(&temp, "aria.json", aria_json());
    let config = Config {
        database: temp.path().join("untouched.redb"),
        ..Config::default()
    };
    let cli = Cli {
        config: None,
        database: None,
        json: false,
        command: Command::Describe { file },
    };

    run(cli, &config).await.unwrap();
    assert!(!config.database.exists());
}

#[test]
fn test_export_markdown_to_stdout() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let file = create_character_json(&temp, "aria.json", aria_json());
    cmd_import(&ctx, &file, &mut Vec::new()).unwrap();

    let mut out = Vec::new();
    cmd_export(&ctx, "Aria Nightshade", FormatArg::Markdown, None, &mut out).unwrap();
    let profile = ctx.profiles.get("Aria Nightshade").unwrap();
    assert_eq!(output_string(out).trim_end(), describe(&profile));
}

#[test]
fn test_export_unknown_character() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    let result = cmd_export(&ctx, "Nobody", FormatArg::Json, None, &mut Vec::new());
    assert!(matches!(result, Err(CliError::CharacterNotFound(_))));
}

#[test]
fn test_create_generates_and_saves() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let form = ProfileForm {
        name: "Kael".to_string(),
        age: Some(40),
        race: Some(Race::Dwarf),
        appearance: vec!["scarred".to_string(), "broad".to_string()],
        speaking_style: Some("Stoic".to_string()),
        ..ProfileForm::default()
    };

    let profile = cmd_create(&ctx, form, false, &mut Vec::new()).unwrap();
    assert_eq!(profile.appearance_keywords.len(), 5);
    assert!(!profile.character_description.is_empty());
    assert_eq!(profile.sample_dialogue.len(), 3);
    assert_eq!(ctx.profiles.get("Kael"), Some(profile));
}

#[test]
fn test_create_requires_name() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    let result = cmd_create(&ctx, ProfileForm::default(), false, &mut Vec::new());
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Character name is required");
    assert!(ctx.profiles.load_all().is_empty());
}

#[test]
fn test_create_rejects_extra_keywords() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let form = ProfileForm {
        name: "Kael".to_string(),
        traits: vec!["a", "b", "c", "d", "e", "f"]
            .into_iter()
            .map(String::from)
            .collect(),
        ..ProfileForm::default()
    };

    let result = cmd_create(&ctx, form, false, &mut Vec::new());
    assert!(matches!(result, Err(CliError::Validation(_))));
}

#[test]
fn test_random_with_save() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    let mut out = Vec::new();
    let profile = cmd_random(&ctx, true, FormatArg::Json, false, &mut out).unwrap();
    let printed: CharacterProfile = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed, profile);
    assert_eq!(ctx.profiles.get(&profile.name), Some(profile));
}

#[test]
fn test_random_without_save() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    cmd_random(&ctx, false, FormatArg::Markdown, false, &mut Vec::new()).unwrap();
    assert!(ctx.profiles.load_all().is_empty());
}

#[test]
fn test_random_json_flag_overrides_format() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    let mut out = Vec::new();
    let profile = cmd_random(&ctx, false, FormatArg::Markdown, true, &mut out).unwrap();
    let printed: CharacterProfile = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed, profile);
}

#[test]
fn test_list_and_delete() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    ctx.profiles.save(&CharacterProfile::named("Aria"));
    ctx.profiles.save(&CharacterProfile::named("Brom"));

    let mut out = Vec::new();
    cmd_list(&ctx, false, &mut out).unwrap();
    let listed = output_string(out);
    assert!(listed.contains("Aria (25, Human Other)"));
    assert!(listed.contains("Brom"));

    cmd_delete(&ctx, "Aria", &mut Vec::new()).unwrap();
    let result = cmd_delete(&ctx, "Aria", &mut Vec::new());
    assert!(matches!(result, Err(CliError::CharacterNotFound(_))));

    let mut out = Vec::new();
    cmd_list(&ctx, true, &mut out).unwrap();
    let summaries: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(summaries.as_array().map(Vec::len), Some(1));
    assert_eq!(summaries[0]["name"], "Brom");
}

#[test]
fn test_background_and_quotes_update_saved_profile() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    ctx.profiles.save(&CharacterProfile::named("Aria"));

    let updated = cmd_background(&ctx, "Aria", &mut Vec::new()).unwrap();
    assert!(MYSTERIOUS_BACKGROUNDS.contains(&updated.current_standing.as_str()));

    let updated = cmd_quotes(&ctx, "Aria", &mut Vec::new()).unwrap();
    assert_eq!(updated.sample_dialogue.len(), QUOTE_PICKS);
    assert!(
        updated
            .sample_dialogue
            .iter()
            .all(|q| QUOTES.contains(&q.as_str()))
    );

    let saved = ctx.profiles.get("Aria").unwrap();
    assert_eq!(saved, updated);
}

#[test]
fn test_profiles_persist_across_contexts() {
    let temp = create_temp_dir();
    {
        let ctx = open_context(&temp);
        ctx.profiles.save(&CharacterProfile::named("Aria"));
    }
    let ctx = open_context(&temp);
    assert!(ctx.profiles.get("Aria").is_some());
}

// =============================================================================
// EMPLOYEE COMMAND TESTS
// =============================================================================

#[test]
fn test_employee_lifecycle() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    let mut out = Vec::new();
    let created = cmd_employee_add(&ctx, ada_args(), false, &mut out).unwrap();
    assert_eq!(created.id, EmployeeId(1));
    assert!(output_string(out).contains("#1 Ada Lovelace <ada@example.com>, Analyst"));

    let fetched = cmd_employee_get(&ctx, created.id, true, &mut Vec::new()).unwrap();
    assert_eq!(fetched, created);

    let changes = EmployeeArgs {
        phone: Some("555-0100".to_string()),
        ..ada_args()
    };
    let updated = cmd_employee_update(&ctx, created.id, changes, false, &mut Vec::new()).unwrap();
    assert_eq!(updated.record.phone.as_deref(), Some("555-0100"));

    let mut out = Vec::new();
    cmd_employee_list(&ctx, true, &mut out).unwrap();
    let listed: Vec<charforge_core::Employee> = serde_json::from_slice(&out).unwrap();
    assert_eq!(listed, vec![updated]);

    cmd_employee_delete(&ctx, created.id, &mut Vec::new()).unwrap();
    let result = cmd_employee_get(&ctx, created.id, false, &mut Vec::new());
    assert!(matches!(result, Err(CliError::EmployeeNotFound(_))));
}

#[test]
fn test_employee_validation_errors() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);
    let args = EmployeeArgs {
        phone: Some("1".repeat(16)),
        ..ada_args()
    };

    let err = cmd_employee_add(&ctx, args, false, &mut Vec::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Phone must be at most 15 characters (got 16)"
    );

    let mut out = Vec::new();
    cmd_employee_list(&ctx, false, &mut out).unwrap();
    assert_eq!(output_string(out).trim(), "No employees");
}

#[test]
fn test_employee_update_unknown_id() {
    let temp = create_temp_dir();
    let ctx = open_context(&temp);

    let result = cmd_employee_update(&ctx, EmployeeId(9), ada_args(), false, &mut Vec::new());
    assert!(matches!(result, Err(CliError::EmployeeNotFound(EmployeeId(9)))));
}
