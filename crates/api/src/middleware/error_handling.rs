//! # Error Handling Middleware
//!
//! Maps [`PollError`] to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use whenmeet_core::errors::PollError;

/// Application error wrapper that provides HTTP status code mapping
#[derive(Debug)]
pub struct AppError(pub PollError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PollError::InvalidParticipant(_) => StatusCode::BAD_REQUEST,
            PollError::Validation(_) => StatusCode::BAD_REQUEST,
            PollError::MeetingNotFound(_) => StatusCode::NOT_FOUND,
            PollError::StoreWriteFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PollError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `PollResult` inside handlers.
impl From<PollError> for AppError {
    fn from(err: PollError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(PollError::Store(err))
    }
}

/// Malformed request bodies, such as a slot hour above 23, are validation
/// errors rather than axum's plain-text 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(PollError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(PollError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(PollError::Validation(rejection.body_text()))
    }
}

/// Maps a PollError to an HTTP response
pub fn map_error(err: PollError) -> Response {
    AppError(err).into_response()
}
