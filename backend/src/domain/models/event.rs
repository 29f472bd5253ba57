//! Domain model for a logged baby activity.
//!
//! On the wire an event is a flat record with optional type-specific fields.
//! Inside the domain it is a tagged sum so each kind only carries the data
//! that belongs to it.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::{DiaperType, EventType, FeedingType};

/// Longest note accepted on an event
pub const MAX_NOTE_LENGTH: usize = 512;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub baby_id: i64,
    /// When the activity started
    pub occurred_at: DateTime<FixedOffset>,
    pub note: Option<String>,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Feeding {
        feeding_type: FeedingType,
        /// Milliliters
        amount: Option<f64>,
        /// Minutes
        duration: Option<f64>,
    },
    Sleep {
        /// `None` while the session is still in progress
        end_date: Option<DateTime<FixedOffset>>,
    },
    Diaper {
        diaper_type: DiaperType,
    },
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self.kind {
            EventKind::Feeding { .. } => EventType::Feeding,
            EventKind::Sleep { .. } => EventType::Sleep,
            EventKind::Diaper { .. } => EventType::Diaper,
        }
    }

    pub fn is_feeding(&self) -> bool {
        matches!(self.kind, EventKind::Feeding { .. })
    }

    pub fn is_sleep(&self) -> bool {
        matches!(self.kind, EventKind::Sleep { .. })
    }

    pub fn is_diaper(&self) -> bool {
        matches!(self.kind, EventKind::Diaper { .. })
    }

    /// Wall-clock start time in the offset the event was recorded with.
    /// Day bucketing compares against this value.
    pub fn local_occurred_at(&self) -> NaiveDateTime {
        self.occurred_at.naive_local()
    }

    /// Length of a completed sleep session in minutes.
    ///
    /// Returns `None` for in-progress sessions and for non-sleep events.
    /// An end before the start counts as a zero-length session.
    pub fn sleep_minutes(&self) -> Option<f64> {
        match &self.kind {
            EventKind::Sleep { end_date: Some(end) } => {
                let seconds = end.signed_duration_since(self.occurred_at).num_seconds();
                Some(seconds.max(0) as f64 / 60.0)
            }
            _ => None,
        }
    }
}

/// Events of kind feeding, in input order
pub fn feedings(events: &[Event]) -> Vec<&Event> {
    events.iter().filter(|e| e.is_feeding()).collect()
}

/// Events of kind sleep, in input order
pub fn sleeps(events: &[Event]) -> Vec<&Event> {
    events.iter().filter(|e| e.is_sleep()).collect()
}

/// Events of kind diaper, in input order
pub fn diapers(events: &[Event]) -> Vec<&Event> {
    events.iter().filter(|e| e.is_diaper()).collect()
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EventValidationError {
    #[error("Invalid timestamp '{0}': expected RFC 3339")]
    InvalidTimestamp(String),
    #[error("Feeding events require a feeding_type")]
    MissingFeedingType,
    #[error("Diaper events require a diaper_type")]
    MissingDiaperType,
    #[error("Field '{field}' is not allowed on {event_type} events")]
    UnexpectedField {
        field: &'static str,
        event_type: EventType,
    },
    #[error("Sleep end_date is before occurred_at")]
    EndBeforeStart,
    #[error("Note is too long (max {} characters)", MAX_NOTE_LENGTH)]
    NoteTooLong,
}

/// Flat form of an event: one column per field, type-specific columns
/// optional. This is the shape stored on disk and sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub baby_id: i64,
    pub event_type: EventType,
    pub occurred_at: String,
    pub end_date: Option<String>,
    pub feeding_type: Option<FeedingType>,
    pub amount: Option<f64>,
    pub duration: Option<f64>,
    pub diaper_type: Option<DiaperType>,
    pub note: Option<String>,
}

impl EventRecord {
    /// Validate the flat record and build the tagged domain event
    pub fn into_event(self) -> Result<Event, EventValidationError> {
        let occurred_at = parse_timestamp(&self.occurred_at)?;
        let event_type = self.event_type;
        let reject = |present: bool, field: &'static str| {
            if present {
                Err(EventValidationError::UnexpectedField { field, event_type })
            } else {
                Ok(())
            }
        };

        let kind = match event_type {
            EventType::Feeding => {
                reject(self.diaper_type.is_some(), "diaper_type")?;
                reject(self.end_date.is_some(), "end_date")?;
                let feeding_type = self.feeding_type.ok_or(EventValidationError::MissingFeedingType)?;
                EventKind::Feeding {
                    feeding_type,
                    amount: self.amount,
                    duration: self.duration,
                }
            }
            EventType::Sleep => {
                reject(self.feeding_type.is_some(), "feeding_type")?;
                reject(self.diaper_type.is_some(), "diaper_type")?;
                reject(self.amount.is_some(), "amount")?;
                reject(self.duration.is_some(), "duration")?;
                let end_date = match self.end_date.as_deref().map(str::trim) {
                    Some(end) if !end.is_empty() => Some(parse_timestamp(end)?),
                    _ => None,
                };
                if matches!(end_date, Some(end) if end < occurred_at) {
                    return Err(EventValidationError::EndBeforeStart);
                }
                EventKind::Sleep { end_date }
            }
            EventType::Diaper => {
                reject(self.feeding_type.is_some(), "feeding_type")?;
                reject(self.end_date.is_some(), "end_date")?;
                reject(self.amount.is_some(), "amount")?;
                reject(self.duration.is_some(), "duration")?;
                let diaper_type = self.diaper_type.ok_or(EventValidationError::MissingDiaperType)?;
                EventKind::Diaper { diaper_type }
            }
        };

        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if note.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTE_LENGTH) {
            return Err(EventValidationError::NoteTooLong);
        }

        Ok(Event {
            id: self.id,
            baby_id: self.baby_id,
            occurred_at,
            note,
            kind,
        })
    }
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        let mut record = EventRecord {
            id: event.id,
            baby_id: event.baby_id,
            event_type: event.event_type(),
            occurred_at: event.occurred_at.to_rfc3339(),
            end_date: None,
            feeding_type: None,
            amount: None,
            duration: None,
            diaper_type: None,
            note: event.note.clone(),
        };

        match &event.kind {
            EventKind::Feeding { feeding_type, amount, duration } => {
                record.feeding_type = Some(*feeding_type);
                record.amount = *amount;
                record.duration = *duration;
            }
            EventKind::Sleep { end_date } => {
                record.end_date = end_date.map(|end| end.to_rfc3339());
            }
            EventKind::Diaper { diaper_type } => {
                record.diaper_type = Some(*diaper_type);
            }
        }

        record
    }
}

/// Parse an RFC 3339 timestamp, keeping the offset it was written with
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, EventValidationError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map_err(|_| EventValidationError::InvalidTimestamp(value.to_string()))
}
