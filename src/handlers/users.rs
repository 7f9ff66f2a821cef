use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tower_sessions::Session as CookieSession;
use crate::dashboard::SessionStore;
use crate::errors::{response::AppJson, AppError, AppResult};
use crate::models::{IdPayload, Keyed, NewUser, PublicUser, UserPatch};
use crate::AppState;

fn required_id(id: Option<String>) -> AppResult<String> {
    id.filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("User ID is required".into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(new_user): AppJson<NewUser>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let current = session.load_session().await?;
    let created = state.dashboard.add_user(&current, new_user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_user(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(body): AppJson<Keyed<UserPatch>>,
) -> AppResult<Json<PublicUser>> {
    let id = required_id(body.id)?;
    let mut current = session.load_session().await?;

    let updated = state.dashboard.update_user(&mut current, &id, &body.fields).await?;
    session.save_session(&current).await?;
    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(body): AppJson<IdPayload>,
) -> AppResult<Json<Value>> {
    let id = required_id(body.id)?;
    let mut current = session.load_session().await?;

    state.dashboard.delete_user(&mut current, &id).await?;
    session.save_session(&current).await?;
    Ok(Json(json!({ "message": "User and associated records deleted" })))
}
