//! Budget endpoints
//!
//! Handlers that address a single budget run the existence guard first, then
//! validation (for edits), then the ownership check.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Extension, Json,
};

use crate::api::dto::MessageResponse;
use crate::api::error::ApiResult;
use crate::api::format::{formatted, FormatQuery};
use crate::api::guards;
use crate::api::state::AppState;
use crate::auth::Principal;
use crate::models::{Budget, BudgetId, CreateBudgetCommand, UpdateBudgetCommand};

/// Summaries of the budgets visible to the caller
pub async fn list_budgets(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<FormatQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let format = query.resolve()?;

    let summaries = state
        .budgets()
        .list_brief(principal.id, principal.is_admin)?;

    formatted(format, &summaries, &summaries)
}

/// One budget with its expenses
pub async fn get_budget(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<BudgetId>, PathRejection>,
    query: Result<Query<FormatQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Path(id) = path?;
    let Query(query) = query?;
    let format = query.resolve()?;

    let service = state.budgets();
    guards::ensure_budget_exists(&service, id)?;

    let budget = service.get_by_id(id)?;
    guards::authorize_budget(&principal, &budget)?;

    formatted(format, &budget, &[budget.summary()])
}

/// Create a budget owned by the caller
pub async fn create_budget(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<CreateBudgetCommand>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(command) = body?;
    guards::validate_command(&command)?;

    let id = state.budgets().create(command, &principal)?;

    Ok(Json(MessageResponse::created(id)))
}

/// Replace the editable fields of a budget
pub async fn edit_budget(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<BudgetId>, PathRejection>,
    body: Result<Json<UpdateBudgetCommand>, JsonRejection>,
) -> ApiResult<Json<Budget>> {
    let Path(id) = path?;

    let service = state.budgets();
    guards::ensure_budget_exists(&service, id)?;

    let Json(command) = body?;
    guards::validate_command(&command)?;
    let command = command.for_budget(id)?;

    let budget = service.get_by_id(id)?;
    guards::authorize_budget(&principal, &budget)?;

    let updated = service.update(&command, Some(principal.id))?;
    Ok(Json(updated))
}

/// Soft-delete a budget
pub async fn delete_budget(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<BudgetId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = path?;

    let service = state.budgets();
    guards::ensure_budget_exists(&service, id)?;

    let budget = service.get_by_id(id)?;
    guards::authorize_budget(&principal, &budget)?;

    service.delete(id, Some(principal.id))?;
    Ok(Json(MessageResponse::deleted(id)))
}
