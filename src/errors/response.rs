use axum::{
    extract::rejection::JsonRejection,
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use crate::errors::{AppError, AuthError};

// The IntoResponse trait implementation converts AppError into a `{ message }` JSON body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // A disabled account is known but refused; everything else is unauthenticated
            AppError::Auth(AuthError::Disabled) => StatusCode::FORBIDDEN,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,

            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,

            AppError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                return message(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Could not connect to the data store",
                );
            }

            AppError::Session(e) => {
                tracing::error!("Session failure: {}", e);
                return message(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
            }

            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        message(status, &self.to_string())
    }
}

pub fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// `Json` whose rejections come back as `{ message }` like every other error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

pub async fn method_not_allowed() -> Response {
    message(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
