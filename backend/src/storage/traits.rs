//! # Storage Traits
//!
//! Storage abstraction the domain layer depends on, so different backends
//! can be swapped in without touching the services.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::domain::models::event::Event;

/// Interface for event storage operations
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// Store a new event
    async fn store_event(&self, event: &Event) -> Result<()>;

    /// Retrieve a specific event for a baby
    async fn get_event(&self, baby_id: i64, event_id: i64) -> Result<Option<Event>>;

    /// List a baby's events, optionally bounded (both bounds inclusive).
    /// Returns events ordered by `occurred_at` descending (most recent first).
    async fn list_events(
        &self,
        baby_id: i64,
        start: Option<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    ) -> Result<Vec<Event>>;

    /// Delete a single event.
    /// Returns true if the event was found and deleted, false otherwise
    async fn delete_event(&self, baby_id: i64, event_id: i64) -> Result<bool>;

    /// Next unused event id across all babies
    async fn next_event_id(&self) -> Result<i64>;
}

/// Storage connection that hands out repositories
pub trait Connection: Send + Sync + Clone {
    type EventRepository: EventStorage + Clone;

    fn create_event_repository(&self) -> Self::EventRepository;
}
