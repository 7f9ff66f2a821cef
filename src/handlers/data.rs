use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tower_sessions::Session as CookieSession;
use crate::catalog::{self, TaskCatalog, TimeStudyRow};
use crate::dashboard::{DashboardView, SessionStore};
use crate::errors::AppResult;
use crate::AppState;

pub async fn get_data(
    State(state): State<AppState>,
    session: CookieSession,
) -> AppResult<Json<DashboardView>> {
    let current = session.load_session().await?;
    let view = state.dashboard.load_view(&current).await?;
    Ok(Json(view))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "insights": state.insights.is_enabled(),
    }))
}

pub async fn catalog(State(state): State<AppState>) -> Json<TaskCatalog> {
    Json(state.catalog.as_ref().clone())
}

pub async fn time_study() -> Json<Vec<TimeStudyRow>> {
    Json(catalog::time_study())
}
