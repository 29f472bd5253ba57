//! Event logging and retrieval.
//!
//! This is the fetching side the analytics depend on: given a baby and an
//! optional window it returns the full matching list in one go, newest first.

use chrono::Duration;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::commands::events::{CreateEventCommand, DeleteEventCommand, EventListQuery};
use crate::domain::date_range::DateRange;
use crate::domain::models::event::{parse_timestamp, Event, EventRecord, EventValidationError};
use crate::storage::{Connection, EventStorage};

/// UTC offsets run from -12:00 to +14:00, so the same wall-clock day can sit
/// up to 26 hours apart in two offsets.
const OFFSET_SLACK_DAYS: i64 = 2;

#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    #[error(transparent)]
    Validation(#[from] EventValidationError),
    #[error("Event {event_id} not found for baby {baby_id}")]
    NotFound { baby_id: i64, event_id: i64 },
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type EventServiceResult<T> = std::result::Result<T, EventServiceError>;

#[derive(Clone)]
pub struct EventService<C: Connection> {
    event_repository: C::EventRepository,
    /// Held from id assignment until the new event is stored
    create_lock: Arc<Mutex<()>>,
}

impl<C: Connection> EventService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            event_repository: connection.create_event_repository(),
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Validate and store a new event, assigning it the next free id
    pub async fn create_event(&self, command: CreateEventCommand) -> EventServiceResult<Event> {
        info!(
            "📝 Logging {} event for baby {} at {}",
            command.event_type, command.baby_id, command.occurred_at
        );

        let _guard = self.create_lock.lock().await;
        let id = self.event_repository.next_event_id().await?;
        let record = EventRecord {
            id,
            baby_id: command.baby_id,
            event_type: command.event_type,
            occurred_at: command.occurred_at,
            end_date: command.end_date,
            feeding_type: command.feeding_type,
            amount: command.amount,
            duration: command.duration,
            diaper_type: command.diaper_type,
            note: command.note,
        };

        let event = record.into_event().map_err(|e| {
            warn!("Rejected event for baby {}: {}", command.baby_id, e);
            e
        })?;
        self.event_repository.store_event(&event).await?;

        Ok(event)
    }

    pub async fn get_event(&self, baby_id: i64, event_id: i64) -> EventServiceResult<Event> {
        self.event_repository
            .get_event(baby_id, event_id)
            .await?
            .ok_or(EventServiceError::NotFound { baby_id, event_id })
    }

    /// All events for a baby inside the optional window, newest first
    pub async fn list_events(&self, query: EventListQuery) -> EventServiceResult<Vec<Event>> {
        let start = query.start_date.as_deref().map(parse_timestamp).transpose()?;
        let end = query.end_date.as_deref().map(parse_timestamp).transpose()?;

        let events = self.event_repository.list_events(query.baby_id, start, end).await?;
        info!("Found {} events for baby {}", events.len(), query.baby_id);
        Ok(events)
    }

    /// Events that can land in any calendar day of `range`.
    ///
    /// The fetch is widened on each side so events recorded with a different
    /// UTC offset than the range are still returned; the aggregators place
    /// them on exact days afterwards.
    pub async fn list_events_for_range(&self, baby_id: i64, range: &DateRange) -> EventServiceResult<Vec<Event>> {
        let start = range.from - Duration::days(OFFSET_SLACK_DAYS);
        let end = range.to + Duration::days(OFFSET_SLACK_DAYS);
        let events = self.event_repository.list_events(baby_id, Some(start), Some(end)).await?;
        info!(
            "Found {} events for baby {} around {} ({})",
            events.len(),
            baby_id,
            range.label,
            range.value
        );
        Ok(events)
    }

    pub async fn delete_event(&self, command: DeleteEventCommand) -> EventServiceResult<()> {
        let deleted = self
            .event_repository
            .delete_event(command.baby_id, command.event_id)
            .await?;

        if deleted {
            Ok(())
        } else {
            Err(EventServiceError::NotFound {
                baby_id: command.baby_id,
                event_id: command.event_id,
            })
        }
    }
}
