use axum::{
    middleware::Next,
    response::{IntoResponse, Response},
    extract::{Request, State},
    body::Body,
};
use tower_sessions::Session as CookieSession;
use crate::dashboard::{Session, SessionStore};
use crate::errors::{AppError, AuthError};
use crate::AppState;

const PUBLIC_PATHS: &[&str] = &["/api/login", "/api/health", "/api/catalog", "/api/time-study"];

/// Rejects `/api` calls without a signed-in user. Static assets and the
/// public endpoints pass through.
///
/// The cookie session is checked against the stored account on every call:
/// a changed account is written back, a deleted or disabled one clears the
/// cookie session and the request is refused.
pub async fn require_auth(
    State(state): State<AppState>,
    session: CookieSession,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    if !path.starts_with("/api/") || PUBLIC_PATHS.contains(&path) {
        return next.run(req).await;
    }

    match resume(&state, &session).await {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

async fn resume(state: &AppState, session: &CookieSession) -> Result<(), AppError> {
    let cached = session.load_session().await?;
    if cached == Session::LoggedOut {
        return Err(AuthError::NotAuthenticated.into());
    }

    match state.dashboard.refresh(&cached).await {
        Ok(fresh) => {
            if fresh != cached {
                session.save_session(&fresh).await?;
            }
            Ok(())
        }
        Err(err @ AppError::Auth(_)) => {
            session.save_session(&Session::LoggedOut).await?;
            Err(err)
        }
        Err(err) => Err(err),
    }
}
