//! # CLI Module
//!
//! Command-line interface for Charforge.
//!
//! Every command is a `cmd_*` function that takes the opened stores and an
//! output sink, so integration tests drive them without a process.

use crate::api::{self, AppState};
use crate::config::{Config, ConfigError};
use charforge_core::formats::{self, ExportFormat};
use charforge_core::profile::{
    CharacterProfile, Gender, KEYWORD_SLOTS, PersonalityType, Profession, Race, VoiceType,
};
use charforge_core::storage::{self, DeleteOutcome};
use charforge_core::workbench::generate_profile;
use charforge_core::{
    CoreError, Employee, EmployeeId, EmployeeRecord, EmployeeRepository, FormatError,
    ProfileGenerator, ProfileStore, RedbStorage, SaveOutcome, StoreError, ValidationError,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "charforge", version, about = "Character workbench and employee records")]
pub struct Cli {
    /// Config file (defaults to ./charforge.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overrides the configured path
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a fully random character
    Random {
        /// Also save it to the profile list
        #[arg(long)]
        save: bool,
        /// Output format (`--json` selects json)
        #[arg(long, value_enum, default_value_t = FormatArg::Markdown)]
        format: FormatArg,
    },
    /// Build a character from flags, generate its card and save it
    Create(ProfileForm),
    /// Print the description of a character JSON file
    Describe { file: PathBuf },
    /// Import a character JSON file into the profile list
    Import { file: PathBuf },
    /// Export a saved character
    Export {
        name: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Output file or directory (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List saved characters
    List,
    /// Show a saved character
    Show { name: String },
    /// Delete a saved character
    Delete { name: String },
    /// Give a saved character a random mysterious background
    Background { name: String },
    /// Give a saved character random quotes
    Quotes { name: String },
    /// Employee records
    Employee {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Start the HTTP API
    Serve {
        /// Listen address, overrides the configured one
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    Add(EmployeeArgs),
    List,
    Get {
        id: u64,
    },
    /// Replace every field of an employee
    Update {
        id: u64,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
}

impl From<EmployeeArgs> for EmployeeRecord {
    fn from(args: EmployeeArgs) -> Self {
        EmployeeRecord {
            name: args.name,
            email: args.email,
            phone: args.phone,
            position: args.position,
        }
    }
}

/// The character form as command-line flags.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileForm {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub race: Option<Race>,
    #[arg(long)]
    pub profession: Option<Profession>,
    /// Appearance keyword (repeatable, up to five)
    #[arg(long = "appearance")]
    pub appearance: Vec<String>,
    #[arg(long)]
    pub birthplace: Option<String>,
    #[arg(long)]
    pub faith: Option<String>,
    #[arg(long)]
    pub childhood: Option<String>,
    #[arg(long)]
    pub standing: Option<String>,
    /// Personality keyword (repeatable, up to five)
    #[arg(long = "trait")]
    pub traits: Vec<String>,
    #[arg(long)]
    pub speaking_style: Option<String>,
    #[arg(long)]
    pub personality: Option<PersonalityType>,
    #[arg(long)]
    pub combat: Option<String>,
    #[arg(long)]
    pub special: Option<String>,
    #[arg(long)]
    pub social: Option<String>,
    #[arg(long)]
    pub voice: Option<VoiceType>,
}

impl ProfileForm {
    /// Apply the flags over a default profile.
    pub fn into_profile(self) -> Result<CharacterProfile, ValidationError> {
        let defaults = CharacterProfile::default();
        let appearance_keywords = slots("Appearance keyword", self.appearance)?;
        let personality_keywords = slots("Personality keyword", self.traits)?;
        Ok(CharacterProfile {
            name: self.name,
            age: self.age.unwrap_or(defaults.age),
            gender: self.gender.unwrap_or_default(),
            race: self.race.unwrap_or_default(),
            profession: self.profession.unwrap_or_default(),
            appearance_keywords,
            birthplace: self.birthplace.unwrap_or_default(),
            faith: self.faith.unwrap_or_default(),
            childhood_experience: self.childhood.unwrap_or_default(),
            current_standing: self.standing.unwrap_or_default(),
            personality_keywords,
            speaking_style: self.speaking_style.unwrap_or(defaults.speaking_style),
            personality: self.personality,
            combat_abilities: self.combat.unwrap_or_default(),
            special_skills: self.special.unwrap_or_default(),
            social_skills: self.social.unwrap_or_default(),
            voice_type: self.voice.unwrap_or_default(),
            ..CharacterProfile::default()
        })
    }
}

/// Pad keyword flags out to the fixed slot count.
fn slots(field: &'static str, mut values: Vec<String>) -> Result<Vec<String>, ValidationError> {
    if values.len() > KEYWORD_SLOTS {
        return Err(ValidationError::SlotOutOfRange {
            field,
            index: KEYWORD_SLOTS,
            slots: KEYWORD_SLOTS,
        });
    }
    values.resize(KEYWORD_SLOTS, String::new());
    Ok(values)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Markdown,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Markdown => ExportFormat::Markdown,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The user sees a generic message; the cause stays in the source chain.
    #[error("Invalid character data format")]
    InvalidImport(#[source] FormatError),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("character '{0}' not found")]
    CharacterNotFound(String),

    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    #[error("character '{0}' could not be saved")]
    SaveFailed(String),

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),
}

// =============================================================================
// CONTEXT
// =============================================================================

/// The opened stores shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub profiles: ProfileStore<RedbStorage>,
    pub employees: EmployeeRepository,
}

impl Context {
    /// Open the database at `path`, creating it when missing.
    pub fn open(path: &Path, storage_key: &str) -> Result<Self, CliError> {
        let db = storage::open_database(path)?;
        let profiles = ProfileStore::with_key(RedbStorage::new(Arc::clone(&db))?, storage_key);
        let employees = EmployeeRepository::new(db)?;
        Ok(Self {
            profiles,
            employees,
        })
    }

    fn saved(&self, name: &str) -> Result<CharacterProfile, CliError> {
        self.profiles
            .get(name)
            .ok_or_else(|| CliError::CharacterNotFound(name.to_string()))
    }

    fn save(&self, profile: &CharacterProfile) -> Result<SaveOutcome, CliError> {
        let outcome = self.profiles.save(profile);
        if outcome.is_saved() {
            Ok(outcome)
        } else {
            Err(CliError::SaveFailed(profile.name.clone()))
        }
    }
}

// =============================================================================
// CHARACTER COMMANDS
// =============================================================================

/// Generate a random character, optionally saving it.
///
/// `json` forces JSON output whatever `format` says.
pub fn cmd_random(
    ctx: &Context,
    save: bool,
    format: FormatArg,
    json: bool,
    out: &mut dyn Write,
) -> Result<CharacterProfile, CliError> {
    let format = if json { FormatArg::Json } else { format };
    let profile = ProfileGenerator::from_entropy().profile();
    if save {
        let outcome = ctx.save(&profile)?;
        tracing::info!(name = %profile.name, ?outcome, "saved random character");
    }
    writeln!(out, "{}", formats::export(&profile, format.into())?)?;
    Ok(profile)
}

/// Build a character from the form flags, generate its card and save it.
pub fn cmd_create(
    ctx: &Context,
    form: ProfileForm,
    json: bool,
    out: &mut dyn Write,
) -> Result<CharacterProfile, CliError> {
    let profile = generate_profile(form.into_profile()?)?;
    let outcome = ctx.save(&profile)?;
    if json {
        writeln!(out, "{}", formats::export_json(&profile)?)?;
    } else {
        writeln!(out, "{}", profile.character_description)?;
        writeln!(out)?;
        writeln!(out, "{} '{}'", outcome_label(outcome), profile.name)?;
    }
    Ok(profile)
}

/// Import a character file and print its generated description.
pub fn cmd_describe(path: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let profile = generate_profile(read_profile(path)?)?;
    writeln!(out, "{}", profile.character_description)?;
    Ok(())
}

/// Import a character file into the saved list.
pub fn cmd_import(
    ctx: &Context,
    path: &Path,
    out: &mut dyn Write,
) -> Result<SaveOutcome, CliError> {
    let profile = read_profile(path)?;
    let outcome = ctx.save(&profile)?;
    writeln!(out, "{} '{}'", outcome_label(outcome), profile.name.trim())?;
    Ok(outcome)
}

/// Export a saved character to `output` or to `out`.
///
/// When `output` is a directory the file is named after the character.
pub fn cmd_export(
    ctx: &Context,
    name: &str,
    format: FormatArg,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let profile = ctx.saved(name)?;
    let format = ExportFormat::from(format);
    let text = formats::export(&profile, format)?;

    let Some(output) = output else {
        writeln!(out, "{text}")?;
        return Ok(());
    };
    let target = if output.is_dir() {
        output.join(formats::export_file_name(&profile, format))
    } else {
        output.to_path_buf()
    };
    std::fs::write(&target, text).map_err(|source| CliError::Io {
        path: target.clone(),
        source,
    })?;
    tracing::info!(path = %target.display(), "exported character");
    writeln!(out, "Exported '{}' to {}", profile.name, target.display())?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ProfileSummary<'a> {
    name: &'a str,
    age: u32,
    race: Race,
    profession: Profession,
}

/// List saved characters.
pub fn cmd_list(ctx: &Context, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let profiles = ctx.profiles.load_all();
    if json {
        let summaries: Vec<ProfileSummary<'_>> = profiles
            .iter()
            .map(|p| ProfileSummary {
                name: &p.name,
                age: p.age,
                race: p.race,
                profession: p.profession,
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
        return Ok(());
    }

    if profiles.is_empty() {
        writeln!(out, "No saved characters")?;
    }
    for profile in &profiles {
        writeln!(
            out,
            "{} ({}, {})",
            profile.name,
            profile.age,
            profile.summary_line()
        )?;
    }
    Ok(())
}

/// Show a saved character.
pub fn cmd_show(ctx: &Context, name: &str, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let profile = ctx.saved(name)?;
    let format = if json {
        ExportFormat::Json
    } else {
        ExportFormat::Markdown
    };
    writeln!(out, "{}", formats::export(&profile, format)?)?;
    if !json && !profile.sample_dialogue.is_empty() {
        writeln!(out)?;
        for line in &profile.sample_dialogue {
            writeln!(out, "> {line}")?;
        }
    }
    Ok(())
}

/// Delete a saved character.
pub fn cmd_delete(ctx: &Context, name: &str, out: &mut dyn Write) -> Result<(), CliError> {
    match ctx.profiles.delete(name) {
        DeleteOutcome::Removed => {
            writeln!(out, "Deleted '{}'", name.trim())?;
            Ok(())
        }
        DeleteOutcome::NotFound => Err(CliError::CharacterNotFound(name.to_string())),
        DeleteOutcome::Failed => Err(CliError::SaveFailed(name.to_string())),
    }
}

/// Replace a saved character's current standing with a random background.
pub fn cmd_background(
    ctx: &Context,
    name: &str,
    out: &mut dyn Write,
) -> Result<CharacterProfile, CliError> {
    let mut profile = ctx.saved(name)?;
    ProfileGenerator::from_entropy().apply_background(&mut profile);
    ctx.save(&profile)?;
    writeln!(out, "{}", profile.current_standing)?;
    Ok(profile)
}

/// Replace a saved character's sample dialogue with random quotes.
pub fn cmd_quotes(
    ctx: &Context,
    name: &str,
    out: &mut dyn Write,
) -> Result<CharacterProfile, CliError> {
    let mut profile = ctx.saved(name)?;
    ProfileGenerator::from_entropy().apply_quotes(&mut profile);
    ctx.save(&profile)?;
    for quote in &profile.sample_dialogue {
        writeln!(out, "\"{quote}\"")?;
    }
    Ok(profile)
}

fn read_profile(path: &Path) -> Result<CharacterProfile, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    formats::import_json(&text).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "rejected character file");
        CliError::InvalidImport(e)
    })
}

fn outcome_label(outcome: SaveOutcome) -> &'static str {
    match outcome {
        SaveOutcome::Inserted => "Saved",
        SaveOutcome::Replaced => "Updated",
        SaveOutcome::Unnamed | SaveOutcome::Failed => "Not saved",
    }
}

// =============================================================================
// EMPLOYEE COMMANDS
// =============================================================================

pub fn cmd_employee_add(
    ctx: &Context,
    args: EmployeeArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<Employee, CliError> {
    let employee = ctx.employees.create(args.into())?;
    print_employee(&employee, json, out)?;
    Ok(employee)
}

pub fn cmd_employee_list(ctx: &Context, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let employees = ctx.employees.list()?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&employees)?)?;
        return Ok(());
    }
    if employees.is_empty() {
        writeln!(out, "No employees")?;
    }
    for employee in &employees {
        print_employee(employee, false, out)?;
    }
    Ok(())
}

pub fn cmd_employee_get(
    ctx: &Context,
    id: EmployeeId,
    json: bool,
    out: &mut dyn Write,
) -> Result<Employee, CliError> {
    let employee = ctx
        .employees
        .get(id)?
        .ok_or(CliError::EmployeeNotFound(id))?;
    print_employee(&employee, json, out)?;
    Ok(employee)
}

pub fn cmd_employee_update(
    ctx: &Context,
    id: EmployeeId,
    args: EmployeeArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<Employee, CliError> {
    let employee = ctx
        .employees
        .update(id, args.into())?
        .ok_or(CliError::EmployeeNotFound(id))?;
    print_employee(&employee, json, out)?;
    Ok(employee)
}

pub fn cmd_employee_delete(
    ctx: &Context,
    id: EmployeeId,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !ctx.employees.delete(id)? {
        return Err(CliError::EmployeeNotFound(id));
    }
    writeln!(out, "Deleted employee {id}")?;
    Ok(())
}

fn print_employee(employee: &Employee, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(employee)?)?;
        return Ok(());
    }
    let record = &employee.record;
    write!(out, "#{} {} <{}>", employee.id, record.name, record.email)?;
    if let Some(position) = &record.position {
        write!(out, ", {position}")?;
    }
    if let Some(phone) = &record.phone {
        write!(out, ", {phone}")?;
    }
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run one parsed command against `config`.
///
/// The database is opened only for commands that use it.
pub async fn run(cli: Cli, config: &Config) -> Result<(), CliError> {
    let json = cli.json;

    let command = match cli.command {
        Command::Describe { file } => {
            return cmd_describe(&file, &mut std::io::stdout().lock());
        }
        Command::Serve { bind } => {
            let ctx = Context::open(&config.database, &config.storage_key)?;
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let state = AppState::new(ctx, config.server.api_key.clone());
            return api::serve(Arc::new(state), &bind)
                .await
                .map_err(CliError::Server);
        }
        command => command,
    };

    let ctx = Context::open(&config.database, &config.storage_key)?;
    let mut stdout = std::io::stdout().lock();
    let out: &mut dyn Write = &mut stdout;
    match command {
        Command::Random { save, format } => cmd_random(&ctx, save, format, json, out).map(drop),
        Command::Create(form) => cmd_create(&ctx, form, json, out).map(drop),
        Command::Import { file } => cmd_import(&ctx, &file, out).map(drop),
        Command::Export {
            name,
            format,
            output,
        } => cmd_export(&ctx, &name, format, output.as_deref(), out),
        Command::List => cmd_list(&ctx, json, out),
        Command::Show { name } => cmd_show(&ctx, &name, json, out),
        Command::Delete { name } => cmd_delete(&ctx, &name, out),
        Command::Background { name } => cmd_background(&ctx, &name, out).map(drop),
        Command::Quotes { name } => cmd_quotes(&ctx, &name, out).map(drop),
        Command::Employee { command } => match command {
            EmployeeCommand::Add(args) => cmd_employee_add(&ctx, args, json, out).map(drop),
            EmployeeCommand::List => cmd_employee_list(&ctx, json, out),
            EmployeeCommand::Get { id } => {
                cmd_employee_get(&ctx, EmployeeId(id), json, out).map(drop)
            }
            EmployeeCommand::Update { id, fields } => {
                cmd_employee_update(&ctx, EmployeeId(id), fields, json, out).map(drop)
            }
            EmployeeCommand::Delete { id } => cmd_employee_delete(&ctx, EmployeeId(id), out),
        },
        // Handled above
        Command::Describe { .. } | Command::Serve { .. } => Ok(()),
    }
}
