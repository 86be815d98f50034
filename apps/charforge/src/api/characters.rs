//! Character profile handlers.

use super::{ApiError, AppState, blocking};
use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use charforge_core::formats::{self, ExportFormat};
use charforge_core::storage::DeleteOutcome;
use charforge_core::workbench::generate_profile;
use charforge_core::{CharacterProfile, ProfileGenerator, SaveOutcome};
use serde::Deserialize;
use std::sync::Arc;

type Shared = State<Arc<AppState>>;
type NamePath = Result<Path<String>, PathRejection>;

pub async fn list(State(state): Shared) -> Result<Json<Vec<CharacterProfile>>, ApiError> {
    let profiles = blocking(&state, |state| Ok(state.profiles.load_all())).await?;
    Ok(Json(profiles))
}

/// Upsert by name. 201 when inserted, 200 when replaced.
pub async fn save(
    State(state): Shared,
    body: String,
) -> Result<(StatusCode, Json<CharacterProfile>), ApiError> {
    let profile = formats::import_json(&body)?;
    save_blocking(&state, profile).await
}

pub async fn get(State(state): Shared, name: NamePath) -> Result<Json<CharacterProfile>, ApiError> {
    let Path(name) = name?;
    saved(&state, name).await.map(Json)
}

pub async fn delete(State(state): Shared, name: NamePath) -> Result<StatusCode, ApiError> {
    let Path(name) = name?;
    let lookup = name.clone();
    let outcome = blocking(&state, move |state| Ok(state.profiles.delete(&lookup))).await?;
    match outcome {
        DeleteOutcome::Removed => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => Err(not_found(&name)),
        DeleteOutcome::Failed => Err(ApiError::Internal(format!("failed to delete '{name}'"))),
    }
}

/// The generated description as a Markdown document.
pub async fn markdown(State(state): Shared, name: NamePath) -> Result<impl IntoResponse, ApiError> {
    let Path(name) = name?;
    let profile = saved(&state, name).await?;
    Ok((
        [(CONTENT_TYPE, ExportFormat::Markdown.content_type())],
        formats::export_markdown(&profile),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct RandomQuery {
    #[serde(default)]
    save: bool,
}

/// A fully random character; `?save=true` also stores it.
pub async fn random(
    State(state): Shared,
    query: Result<Query<RandomQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<CharacterProfile>), ApiError> {
    let Query(query) = query?;
    let profile = ProfileGenerator::from_entropy().profile();
    if !query.save {
        return Ok((StatusCode::OK, Json(profile)));
    }
    save_blocking(&state, profile).await
}

/// Run generation on a submitted form without saving it.
///
/// Unlike import, every field is optional here; a blank name is reported as
/// a validation error.
pub async fn generate(body: String) -> Result<Json<CharacterProfile>, ApiError> {
    let profile: CharacterProfile = serde_json::from_str(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid character data format: {e}")))?;
    Ok(Json(generate_profile(profile)?))
}

async fn saved(state: &Arc<AppState>, name: String) -> Result<CharacterProfile, ApiError> {
    blocking(state, move |state| {
        state.profiles.get(&name).ok_or_else(|| not_found(&name))
    })
    .await
}

async fn save_blocking(
    state: &Arc<AppState>,
    profile: CharacterProfile,
) -> Result<(StatusCode, Json<CharacterProfile>), ApiError> {
    blocking(state, move |state| {
        let status = store(state, &profile)?;
        Ok((status, Json(profile)))
    })
    .await
}

fn store(state: &AppState, profile: &CharacterProfile) -> Result<StatusCode, ApiError> {
    match state.profiles.save(profile) {
        SaveOutcome::Inserted => Ok(StatusCode::CREATED),
        SaveOutcome::Replaced => Ok(StatusCode::OK),
        SaveOutcome::Unnamed => Err(ApiError::BadRequest(
            "Character name is required".to_string(),
        )),
        SaveOutcome::Failed => Err(ApiError::Internal(format!(
            "failed to save '{}'",
            profile.name
        ))),
    }
}

fn not_found(name: &str) -> ApiError {
    ApiError::NotFound(format!("character '{name}' not found"))
}
