use axum::{extract::State, Json};
use serde_json::{json, Value};
use tower_sessions::Session as CookieSession;
use crate::dashboard::SessionStore;
use crate::errors::{response::AppJson, AppError, AppResult};
use crate::models::{LoginForm, PublicUser};
use crate::AppState;

#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    session: CookieSession,
    AppJson(login_form): AppJson<LoginForm>,
) -> AppResult<Json<PublicUser>> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    let current = state.dashboard.login(&login_form).await?;
    // fresh id on every login; any id issued before it stops working
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Session(e.to_string()))?;
    session.save_session(&current).await?;

    Ok(Json(current.current_user()?.clone()))
}

pub async fn handle_logout(
    State(state): State<AppState>,
    session: CookieSession,
) -> AppResult<Json<Value>> {
    let current = session.load_session().await?;
    session.save_session(&state.dashboard.logout(&current)).await?;
    Ok(Json(json!({ "message": "Logged out" })))
}

/// The signed-in user, for restoring a login after a reload.
pub async fn current_session(session: CookieSession) -> AppResult<Json<PublicUser>> {
    let current = session.load_session().await?;
    Ok(Json(current.current_user()?.clone()))
}
