//! Domain-level command and query types.
//! These are used by services inside the domain layer and are not exposed
//! over the public API. The REST layer maps the DTOs from the `shared`
//! crate to these internal types.

pub mod events {
    use shared::{DiaperType, EventType, FeedingType};

    /// Input for logging a new event.
    #[derive(Debug, Clone)]
    pub struct CreateEventCommand {
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

    /// Query for a baby's events, both bounds inclusive and optional.
    #[derive(Debug, Clone, Default)]
    pub struct EventListQuery {
        pub baby_id: i64,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteEventCommand {
        pub baby_id: i64,
        pub event_id: i64,
    }
}

pub mod analytics {
    use crate::domain::date_range::DateRange;

    /// Analytics request for one baby. `range: None` uses the default window.
    #[derive(Debug, Clone)]
    pub struct AnalyticsQuery {
        pub baby_id: i64,
        pub range: Option<DateRange>,
    }
}
