//! Analytics report assembly.
//!
//! Resolves the requested window, pulls the baby's events through the event
//! service and runs the aggregators over them. Nothing is cached: every call
//! recomputes from freshly fetched events.

use chrono::{FixedOffset, Local, NaiveDate};
use shared::{AnalyticsReport, DiaperSummary, FeedingSummary, OverviewSeries, SleepSummary};
use tracing::info;

use crate::domain::commands::analytics::AnalyticsQuery;
use crate::domain::date_range::{days_in_range, DateRange, DateRangeError};
use crate::domain::diaper_analytics::aggregate_diapers;
use crate::domain::event_service::{EventService, EventServiceError};
use crate::domain::feeding_analytics::aggregate_feedings;
use crate::domain::models::event::Event;
use crate::domain::overview_analytics::aggregate_overview;
use crate::domain::sleep_analytics::aggregate_sleep;
use crate::storage::Connection;

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsServiceError {
    #[error(transparent)]
    Range(#[from] DateRangeError),
    #[error(transparent)]
    Events(#[from] EventServiceError),
}

pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsServiceError>;

#[derive(Clone)]
pub struct AnalyticsService<C: Connection> {
    event_service: EventService<C>,
}

impl<C: Connection> AnalyticsService<C> {
    pub fn new(event_service: EventService<C>) -> Self {
        Self { event_service }
    }

    /// All four summaries for one baby over the requested (or default) window
    pub async fn report(&self, query: AnalyticsQuery) -> AnalyticsResult<AnalyticsReport> {
        let baby_id = query.baby_id;
        let (events, range) = self.load(query).await?;
        let report = build_report(baby_id, Some(events.as_slice()), &range);

        info!(
            "📊 Built {} analytics for baby {}: {} feedings, {} sleep sessions, {} diapers",
            range.label,
            baby_id,
            report.feeding.total_feedings,
            report.sleep.total_sleep_sessions,
            report.diaper.total_diapers
        );
        Ok(report)
    }

    pub async fn feeding_report(&self, query: AnalyticsQuery) -> AnalyticsResult<FeedingSummary> {
        let (events, range) = self.load(query).await?;
        Ok(aggregate_feedings(&events, &range))
    }

    pub async fn sleep_report(&self, query: AnalyticsQuery) -> AnalyticsResult<SleepSummary> {
        let (events, range) = self.load(query).await?;
        Ok(aggregate_sleep(&events, &range))
    }

    pub async fn diaper_report(&self, query: AnalyticsQuery) -> AnalyticsResult<DiaperSummary> {
        let (events, range) = self.load(query).await?;
        Ok(aggregate_diapers(&events, &range))
    }

    pub async fn overview_report(&self, query: AnalyticsQuery) -> AnalyticsResult<OverviewSeries> {
        let (events, range) = self.load(query).await?;
        Ok(aggregate_overview(&events, &range))
    }

    async fn load(&self, query: AnalyticsQuery) -> AnalyticsResult<(Vec<Event>, DateRange)> {
        let range = match query.range {
            Some(range) => range,
            None => default_range()?,
        };
        let events = self
            .event_service
            .list_events_for_range(query.baby_id, &range)
            .await?;
        Ok((events, range))
    }
}

fn local_today() -> (NaiveDate, FixedOffset) {
    let now = Local::now();
    (now.date_naive(), *now.offset())
}

/// Last seven days ending today, in the server's local offset
pub fn default_range() -> Result<DateRange, DateRangeError> {
    let (today, offset) = local_today();
    DateRange::default_for(today, offset)
}

/// Named preset (`today`, `7days`, ...) ending today, in the server's local offset
pub fn preset_range(value: &str) -> Result<DateRange, DateRangeError> {
    let (today, offset) = local_today();
    DateRange::preset(value, today, offset)
}

/// Run every aggregator over `events`. Absent events are treated as none.
pub fn build_report(baby_id: i64, events: Option<&[Event]>, range: &DateRange) -> AnalyticsReport {
    let events = events.unwrap_or_default();

    AnalyticsReport {
        baby_id,
        range: range.to_dto(),
        days_in_range: days_in_range(range),
        feeding: aggregate_feedings(events, range),
        sleep: aggregate_sleep(events, range),
        diaper: aggregate_diapers(events, range),
        overview: aggregate_overview(events, range),
    }
}
