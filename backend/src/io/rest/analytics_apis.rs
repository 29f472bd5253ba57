//! # REST API for Analytics
//!
//! Chart-ready summaries over a date range. The range comes from either a
//! preset (`?range=30days`) or explicit RFC 3339 bounds (`?from=..&to=..`);
//! with neither, the last seven days are used.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::analytics_service::{preset_range, AnalyticsResult, AnalyticsServiceError};
use crate::domain::commands::analytics::AnalyticsQuery;
use crate::domain::date_range::{DateRange, DateRangeError};
use crate::domain::event_service::EventServiceError;
use crate::AppState;

/// Router for analytics APIs, nested under `/babies/:baby_id/analytics`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_report))
        .route("/feeding", get(get_feeding))
        .route("/sleep", get(get_sleep))
        .route("/diaper", get(get_diaper))
        .route("/overview", get(get_overview))
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    pub range: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl AnalyticsParams {
    /// Explicit bounds win over a preset; neither means "use the default"
    pub fn to_range(&self) -> Result<Option<DateRange>, DateRangeError> {
        match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) => DateRange::from_bounds(from, to).map(Some),
            (Some(_), None) | (None, Some(_)) => Err(DateRangeError::IncompleteBounds),
            (None, None) => self.range.as_deref().map(preset_range).transpose(),
        }
    }
}

/// Full report: feeding, sleep, diaper and overview together
pub async fn get_report(
    State(state): State<AppState>,
    Path(baby_id): Path<i64>,
    Query(params): Query<AnalyticsParams>,
) -> Response {
    info!("GET /api/babies/{}/analytics - query: {:?}", baby_id, params);

    match analytics_query(baby_id, &params) {
        Ok(query) => respond("report", state.analytics_service.report(query).await),
        Err(e) => respond::<()>("report", Err(e)),
    }
}

pub async fn get_feeding(
    State(state): State<AppState>,
    Path(baby_id): Path<i64>,
    Query(params): Query<AnalyticsParams>,
) -> Response {
    info!("GET /api/babies/{}/analytics/feeding - query: {:?}", baby_id, params);

    match analytics_query(baby_id, &params) {
        Ok(query) => respond("feeding", state.analytics_service.feeding_report(query).await),
        Err(e) => respond::<()>("feeding", Err(e)),
    }
}

pub async fn get_sleep(
    State(state): State<AppState>,
    Path(baby_id): Path<i64>,
    Query(params): Query<AnalyticsParams>,
) -> Response {
    info!("GET /api/babies/{}/analytics/sleep - query: {:?}", baby_id, params);

    match analytics_query(baby_id, &params) {
        Ok(query) => respond("sleep", state.analytics_service.sleep_report(query).await),
        Err(e) => respond::<()>("sleep", Err(e)),
    }
}

pub async fn get_diaper(
    State(state): State<AppState>,
    Path(baby_id): Path<i64>,
    Query(params): Query<AnalyticsParams>,
) -> Response {
    info!("GET /api/babies/{}/analytics/diaper - query: {:?}", baby_id, params);

    match analytics_query(baby_id, &params) {
        Ok(query) => respond("diaper", state.analytics_service.diaper_report(query).await),
        Err(e) => respond::<()>("diaper", Err(e)),
    }
}

pub async fn get_overview(
    State(state): State<AppState>,
    Path(baby_id): Path<i64>,
    Query(params): Query<AnalyticsParams>,
) -> Response {
    info!("GET /api/babies/{}/analytics/overview - query: {:?}", baby_id, params);

    match analytics_query(baby_id, &params) {
        Ok(query) => respond("overview", state.analytics_service.overview_report(query).await),
        Err(e) => respond::<()>("overview", Err(e)),
    }
}

fn analytics_query(baby_id: i64, params: &AnalyticsParams) -> AnalyticsResult<AnalyticsQuery> {
    Ok(AnalyticsQuery {
        baby_id,
        range: params.to_range()?,
    })
}

fn respond<T: Serialize>(section: &str, result: AnalyticsResult<T>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            if matches!(e, AnalyticsServiceError::Events(EventServiceError::Storage(_))) {
                error!("Failed to build {} analytics: {:#}", section, e);
            } else {
                info!("Rejected {} analytics request: {}", section, e);
            }
            e.into_response()
        }
    }
}
