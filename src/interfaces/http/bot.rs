use super::AppState;
use crate::bot::{BotRequest, BotResponse};
use axum::{Json, Router, extract::State, routing::post};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/bot-simulate", post(simulate))
}

/// POST /api/bot-simulate
///
/// Always answers 200; failures are reported in the `response` text.
async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<BotRequest>,
) -> Json<BotResponse> {
    Json(state.bot.handle(request))
}
