//! # REST API for Events
//!
//! Logging, listing and removing a baby's feeding, sleep and diaper events.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::domain::commands::events::{DeleteEventCommand, EventListQuery};
use crate::domain::event_service::EventServiceError;
use crate::io::rest::mappers::EventMapper;
use crate::AppState;
use shared::{CreateEventRequest, CreateEventResponse, DeleteEventResponse, EventListRequest};

/// Router for event APIs, nested under `/babies/:baby_id/events`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:event_id", get(get_event).delete(delete_event))
}

/// List a baby's events, newest first, optionally bounded
pub async fn list_events(
    State(state): State<AppState>,
    Path(baby_id): Path<i64>,
    Query(params): Query<EventListRequest>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}/events - query: {:?}", baby_id, params);

    let query = EventListQuery {
        baby_id,
        start_date: params.start_date,
        end_date: params.end_date,
    };

    match state.event_service.list_events(query).await {
        Ok(events) => (StatusCode::OK, Json(EventMapper::to_list_response(&events))).into_response(),
        Err(e) => {
            log_failure("list events", &e);
            e.into_response()
        }
    }
}

/// Log a new event
pub async fn create_event(
    State(state): State<AppState>,
    Path(baby_id): Path<i64>,
    Json(request): Json<CreateEventRequest>,
) -> impl IntoResponse {
    info!("POST /api/babies/{}/events - request: {:?}", baby_id, request);

    let command = EventMapper::to_create_command(baby_id, request);
    match state.event_service.create_event(command).await {
        Ok(event) => {
            let response = CreateEventResponse {
                success_message: format!("{} event logged", event.event_type()),
                event: EventMapper::to_dto(&event),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            log_failure("create event", &e);
            e.into_response()
        }
    }
}

pub async fn get_event(
    State(state): State<AppState>,
    Path((baby_id, event_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}/events/{}", baby_id, event_id);

    match state.event_service.get_event(baby_id, event_id).await {
        Ok(event) => (StatusCode::OK, Json(EventMapper::to_dto(&event))).into_response(),
        Err(e) => {
            log_failure("get event", &e);
            e.into_response()
        }
    }
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path((baby_id, event_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    info!("DELETE /api/babies/{}/events/{}", baby_id, event_id);

    let command = DeleteEventCommand { baby_id, event_id };
    match state.event_service.delete_event(command).await {
        Ok(()) => {
            let response = DeleteEventResponse {
                deleted_id: event_id,
                success_message: format!("Event {} deleted", event_id),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            log_failure("delete event", &e);
            e.into_response()
        }
    }
}

fn log_failure(action: &str, e: &EventServiceError) {
    match e {
        EventServiceError::Storage(_) => error!("Failed to {}: {:#}", action, e),
        _ => info!("Could not {}: {}", action, e),
    }
}
