//! # Baby Tracker Backend
//!
//! Stores feeding, sleep and diaper events per baby and turns them into
//! per-day analytics for charting.
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (event model, aggregators, services)
//!     ↓
//! Storage Layer (CSV files per baby)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::BackendConfig;
use crate::domain::{AnalyticsService, EventService};
use crate::io::rest::{analytics_apis, event_apis};
use crate::storage::CsvConnection;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub event_service: EventService<CsvConnection>,
    pub analytics_service: AnalyticsService<CsvConnection>,
}

impl AppState {
    pub fn new(connection: CsvConnection) -> Self {
        let event_service = EventService::new(Arc::new(connection));
        let analytics_service = AnalyticsService::new(event_service.clone());
        Self {
            event_service,
            analytics_service,
        }
    }
}

/// Open storage and wire up the services
pub fn initialize_backend(config: &BackendConfig) -> Result<AppState> {
    info!("Setting up storage in {:?}", config.data_directory);
    let connection = CsvConnection::new(&config.data_directory)?;

    info!("Setting up application state");
    Ok(AppState::new(connection))
}

/// Build the router with every API nested under `/api`
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/babies/:baby_id/events", event_apis::router())
        .nest("/babies/:baby_id/analytics", analytics_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
