//! Banking endpoints.
//!
//! Each session is an independent bank. Commands posted to a session run in
//! order against that bank and the response is the resulting report.

use super::AppState;
use super::error::ApiError;
use crate::application::engine::Report;
use crate::application::scenarios::{COMMAND_TEMPLATES, CommandTemplate, SCENARIOS, Scenario};
use crate::application::sessions::SessionId;
use crate::domain::account::AccountKind;
use crate::domain::rules::AccountLimits;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTypeInfo {
    pub kind: AccountKind,
    pub limits: AccountLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandBatch {
    pub commands: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/banking/scenarios", get(list_scenarios))
        .route("/api/banking/account-types", get(account_types))
        .route("/api/banking/command-templates", get(command_templates))
        .route("/api/banking/sessions", post(create_session))
        .route(
            "/api/banking/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/banking/sessions/{id}/commands", post(run_commands))
        .route("/api/banking/sessions/{id}/reset", post(reset_session))
}

async fn list_scenarios() -> Json<&'static [Scenario]> {
    Json(SCENARIOS)
}

async fn command_templates() -> Json<&'static [CommandTemplate]> {
    Json(COMMAND_TEMPLATES)
}

async fn account_types() -> Json<Vec<AccountTypeInfo>> {
    Json(
        AccountKind::ALL
            .into_iter()
            .map(|kind| AccountTypeInfo {
                kind,
                limits: kind.limits(),
            })
            .collect(),
    )
}

async fn create_session(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let session_id = state.sessions.create().await?;
    tracing::info!(session = %session_id, "banking session opened");
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id })))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Report>, ApiError> {
    Ok(Json(state.sessions.snapshot(id).await?))
}

async fn run_commands(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(batch): Json<CommandBatch>,
) -> Result<Json<Report>, ApiError> {
    if batch.commands.is_empty() {
        return Err(ApiError::InvalidRequest(
            "commands must not be empty".to_string(),
        ));
    }
    Ok(Json(state.sessions.execute(id, batch.commands).await?))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    state.sessions.reset(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(id).await?;
    tracing::info!(session = %id, "banking session closed");
    Ok(StatusCode::NO_CONTENT)
}
