//! Employee handlers.

use super::{ApiError, AppState, blocking};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use charforge_core::{Employee, EmployeeId, EmployeeRecord};
use std::sync::Arc;

type Shared = State<Arc<AppState>>;
type IdPath = Result<Path<u64>, PathRejection>;

pub async fn list(State(state): Shared) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = blocking(&state, |state| Ok(state.employees.list()?)).await?;
    Ok(Json(employees))
}

pub async fn create(
    State(state): Shared,
    payload: Result<Json<EmployeeRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(record) = payload?;
    let employee = blocking(&state, move |state| Ok(state.employees.create(record)?)).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn get(State(state): Shared, id: IdPath) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let id = EmployeeId(id);
    blocking(&state, move |state| Ok(state.employees.get(id)?))
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Full replacement of an employee's fields.
pub async fn update(
    State(state): Shared,
    id: IdPath,
    payload: Result<Json<EmployeeRecord>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let Json(record) = payload?;
    let id = EmployeeId(id);
    blocking(&state, move |state| Ok(state.employees.update(id, record)?))
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete(State(state): Shared, id: IdPath) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let id = EmployeeId(id);
    if blocking(&state, move |state| Ok(state.employees.delete(id)?)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: EmployeeId) -> ApiError {
    ApiError::NotFound(format!("employee {id} not found"))
}
