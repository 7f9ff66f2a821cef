use axum::{extract::State, Json};
use serde_json::{json, Value};
use tower_sessions::Session as CookieSession;
use crate::dashboard::SessionStore;
use crate::errors::{response::AppJson, AppResult};
use crate::models::InsightsQuery;
use crate::AppState;

/// Answers a question about the records the caller is allowed to see.
pub async fn ask_insights(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(body): AppJson<InsightsQuery>,
) -> AppResult<Json<Value>> {
    let current = session.load_session().await?;
    let records = state.dashboard.visible_records(&current).await?;

    tracing::info!("Insights query over {} records", records.len());
    let answer = state.insights.answer(&body.query, &records).await?;
    Ok(Json(json!({ "answer": answer })))
}
