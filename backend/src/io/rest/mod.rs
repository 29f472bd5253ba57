//! # REST API
//!
//! axum handlers for event logging and analytics. Every module exposes a
//! `router()` that is nested under `/api/babies/:baby_id` by [`crate::create_router`].
//!
//! Failures are returned as `{ "error": ..., "code": ... }` JSON bodies.

pub mod analytics_apis;
pub mod event_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::domain::analytics_service::AnalyticsServiceError;
use crate::domain::event_service::EventServiceError;

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>, code: &str) -> Response {
    let body = serde_json::json!({
        "error": message.into(),
        "code": code,
    });
    (status, Json(body)).into_response()
}

impl IntoResponse for EventServiceError {
    fn into_response(self) -> Response {
        match &self {
            EventServiceError::Validation(e) => error_response(StatusCode::BAD_REQUEST, e.to_string(), "INVALID_EVENT"),
            EventServiceError::NotFound { .. } => {
                error_response(StatusCode::NOT_FOUND, self.to_string(), "EVENT_NOT_FOUND")
            }
            EventServiceError::Storage(_) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error accessing event storage",
                "STORAGE_ERROR",
            ),
        }
    }
}

impl IntoResponse for AnalyticsServiceError {
    fn into_response(self) -> Response {
        match self {
            AnalyticsServiceError::Range(e) => error_response(StatusCode::BAD_REQUEST, e.to_string(), "INVALID_RANGE"),
            AnalyticsServiceError::Events(e) => e.into_response(),
        }
    }
}
