use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tower_sessions::Session as CookieSession;
use crate::dashboard::SessionStore;
use crate::entry::EntrySnapshot;
use crate::errors::{response::AppJson, AppError, AppResult};
use crate::models::{IdPayload, Keyed, ProductionRecord, RecordDraft, RecordPatch};
use crate::AppState;

fn required_id(id: Option<String>) -> AppResult<String> {
    id.filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Record ID is required".into()))
}

pub async fn create_record(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(draft): AppJson<RecordDraft>,
) -> AppResult<(StatusCode, Json<ProductionRecord>)> {
    let current = session.load_session().await?;
    tracing::debug!("Record submission: {:?}", draft);

    let today = Utc::now().date_naive();
    let record = state.dashboard.submit_record(&current, &draft, today).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(body): AppJson<Keyed<RecordPatch>>,
) -> AppResult<Json<ProductionRecord>> {
    let id = required_id(body.id)?;
    let current = session.load_session().await?;

    let updated = state.dashboard.update_record(&current, &id, &body.fields).await?;
    Ok(Json(updated))
}

pub async fn delete_record(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(body): AppJson<IdPayload>,
) -> AppResult<Json<Value>> {
    let id = required_id(body.id)?;
    let current = session.load_session().await?;

    state.dashboard.delete_record(&current, &id).await?;
    Ok(Json(json!({ "message": "Record deleted" })))
}

/// Utilization and mode the entry form would show for a partly filled draft.
pub async fn preview_record(
    State(state): State<AppState>,
    AppJson(draft): AppJson<RecordDraft>,
) -> Json<EntrySnapshot> {
    Json(state.dashboard.preview_entry(&draft))
}
