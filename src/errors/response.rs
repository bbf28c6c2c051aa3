use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
};
use crate::errors::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors send the user back to the login page
            AppError::Auth(msg) => {
                Redirect::to(&format!("/?error={}", urlencoding::encode(&msg)))
                    .into_response()
            }

            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),

            AppError::Session(msg) => {
                tracing::error!("Session failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error").into_response()
            }

            // Callers only learn that the write failed
            AppError::Store(e) => {
                tracing::error!("Job store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }

            AppError::File(e) => {
                tracing::error!("File failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("File error: {}", e)).into_response()
            }
        }
    }
}
