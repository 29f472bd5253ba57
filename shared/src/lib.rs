use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single logged activity for a baby, as exchanged over the wire.
///
/// The record is flat: type-specific fields are optional and only one
/// family of them is populated, matching `event_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    /// ID of the baby this event belongs to
    pub baby_id: i64,
    pub event_type: EventType,
    /// When the activity started (RFC 3339)
    pub occurred_at: String,
    /// When a sleep session ended (RFC 3339); absent while the baby is still asleep
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub feeding_type: Option<FeedingType>,
    /// Volume in milliliters (bottle and solid feedings)
    #[serde(default)]
    pub amount: Option<f64>,
    /// Duration in minutes
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub diaper_type: Option<DiaperType>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Discriminant for [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Feeding,
    Sleep,
    Diaper,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Feeding => "feeding",
            EventType::Sleep => "sleep",
            EventType::Diaper => "diaper",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedingType {
    Breast,
    Bottle,
    Solid,
}

impl FeedingType {
    pub const ALL: [FeedingType; 3] = [FeedingType::Breast, FeedingType::Bottle, FeedingType::Solid];

    /// Label shown in chart legends
    pub fn label(&self) -> &'static str {
        match self {
            FeedingType::Breast => "Breast",
            FeedingType::Bottle => "Bottle",
            FeedingType::Solid => "Solid",
        }
    }

    /// Chart color for this feeding type
    pub fn color(&self) -> &'static str {
        match self {
            FeedingType::Breast => "#FF8042",
            FeedingType::Bottle => "#0088FE",
            FeedingType::Solid => "#00C49F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaperType {
    Wet,
    Dirty,
    Both,
}

impl DiaperType {
    pub const ALL: [DiaperType; 3] = [DiaperType::Wet, DiaperType::Dirty, DiaperType::Both];

    pub fn label(&self) -> &'static str {
        match self {
            DiaperType::Wet => "Wet",
            DiaperType::Dirty => "Dirty",
            DiaperType::Both => "Both",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DiaperType::Wet => "#4FC3F7",
            DiaperType::Dirty => "#A1887F",
            DiaperType::Both => "#FFB74D",
        }
    }
}

/// Request for logging a new event. The baby is taken from the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub event_type: EventType,
    /// RFC 3339 timestamp
    pub occurred_at: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub feeding_type: Option<FeedingType>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub diaper_type: Option<DiaperType>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Query string for listing a baby's events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventListRequest {
    /// Start of the window, inclusive (RFC 3339)
    #[serde(default)]
    pub start_date: Option<String>,
    /// End of the window, inclusive (RFC 3339)
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Events for a baby, newest first. Never paginated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub event: Event,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub deleted_id: i64,
    pub success_message: String,
}

/// Window used to scope event queries and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeDto {
    /// RFC 3339 timestamp
    pub from: String,
    /// RFC 3339 timestamp
    pub to: String,
    /// Human-readable name, e.g. "Last 7 days"
    pub label: String,
    /// Machine name, e.g. "7days"
    pub value: String,
}

/// One slice of a proportional chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: u32,
    pub color: String,
}

/// Feeding statistics for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingDayRow {
    /// Display label, e.g. "Jan 1"
    pub date: String,
    pub sort_key: NaiveDate,
    pub breast: u32,
    pub bottle: u32,
    pub solid: u32,
    pub total: u32,
    /// Summed volume in milliliters
    pub amount: f64,
    /// Summed duration in minutes
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingSummary {
    pub total_feedings: u32,
    /// Rounded to one decimal
    pub avg_feedings_per_day: f64,
    /// Mean minutes over feedings with a positive duration
    pub avg_feeding_duration: f64,
    /// Mean volume over feedings with a positive amount, formatted with one decimal
    pub avg_feeding_amount: String,
    pub breast_count: u32,
    pub bottle_count: u32,
    pub solid_count: u32,
    pub daily: Vec<FeedingDayRow>,
    /// Feeding types with a non-zero count
    pub distribution: Vec<DistributionSlice>,
}

/// Sleep statistics for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepDayRow {
    pub date: String,
    pub sort_key: NaiveDate,
    /// Total sleep in hours, two decimals
    pub hours: f64,
    pub sessions: u32,
    /// Average session length in hours, two decimals
    pub avg_session_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSummary {
    pub total_sleep_hours: f64,
    /// Completed sessions only
    pub total_sleep_sessions: u32,
    /// Mean completed session length in whole minutes
    pub avg_sleep_duration: f64,
    pub avg_sleep_per_day: f64,
    pub daily: Vec<SleepDayRow>,
}

/// Diaper statistics for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaperDayRow {
    pub date: String,
    pub sort_key: NaiveDate,
    pub wet: u32,
    pub dirty: u32,
    pub both: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaperSummary {
    pub total_diapers: u32,
    pub wet_diapers: u32,
    pub dirty_diapers: u32,
    pub both_diapers: u32,
    pub daily: Vec<DiaperDayRow>,
    pub distribution: Vec<DistributionSlice>,
}

/// Condensed cross-domain view of a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewDayRow {
    pub date: String,
    pub sort_key: NaiveDate,
    pub feedings: u32,
    /// One decimal
    pub sleep_hours: f64,
    pub diapers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSeries {
    pub daily: Vec<OverviewDayRow>,
}

/// Every aggregation for one baby over one date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub baby_id: i64,
    pub range: DateRangeDto,
    pub days_in_range: u32,
    pub feeding: FeedingSummary,
    pub sleep: SleepSummary,
    pub diaper: DiaperSummary,
    pub overview: OverviewSeries,
}
