//! Date range handling for analytics.
//!
//! A [`DateRange`] is the window the caller wants charts for. It is expanded
//! into one [`DayBucket`] per calendar day, and every aggregator buckets its
//! events against those days. Days are wall-clock days: an instant is placed
//! by the local time it was recorded with, not by UTC.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::domain::models::event::Event;
use shared::DateRangeDto;

/// Presets offered by the range picker, as `(value, label, days)`
pub const RANGE_PRESETS: [(&str, &str, u32); 5] = [
    ("today", "Today", 1),
    ("7days", "Last 7 days", 7),
    ("14days", "Last 14 days", 14),
    ("30days", "Last 30 days", 30),
    ("90days", "Last 90 days", 90),
];

/// Length of the fallback window used when no range is supplied
pub const DEFAULT_RANGE_DAYS: u32 = 7;

/// Longest custom range accepted, in calendar days
pub const MAX_RANGE_DAYS: u32 = 366;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DateRangeError {
    #[error("Unknown date range preset: {0}")]
    UnknownPreset(String),
    #[error("Invalid range bound '{0}': expected RFC 3339")]
    InvalidBound(String),
    #[error("A custom range needs both 'from' and 'to'")]
    IncompleteBounds,
    #[error("Range spans {0} days; at most {} are allowed", MAX_RANGE_DAYS)]
    RangeTooLong(i64),
    #[error("Could not build a local time for {0}")]
    InvalidLocalTime(NaiveDate),
}

/// Caller-supplied analytics window. `from <= to` is assumed, not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
    pub label: String,
    pub value: String,
}

impl DateRange {
    pub fn new(
        from: DateTime<FixedOffset>,
        to: DateTime<FixedOffset>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            label: label.into(),
            value: value.into(),
        }
    }

    /// The last `days` calendar days ending with `today`, from midnight on the
    /// first day to the last second of `today`.
    pub fn last_days(days: u32, today: NaiveDate, offset: FixedOffset) -> Result<Self, DateRangeError> {
        let first_day = today - Duration::days(i64::from(days.max(1)) - 1);
        let from = at_local(first_day, NaiveTime::MIN, offset)?;
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        let to = at_local(today, end_of_day, offset)?;

        let label = if days <= 1 {
            "Today".to_string()
        } else {
            format!("Last {} days", days)
        };
        let value = if days <= 1 {
            "today".to_string()
        } else {
            format!("{}days", days)
        };

        Ok(Self::new(from, to, label, value))
    }

    /// Fallback window: 7 days ending today
    pub fn default_for(today: NaiveDate, offset: FixedOffset) -> Result<Self, DateRangeError> {
        Self::last_days(DEFAULT_RANGE_DAYS, today, offset)
    }

    /// Build one of the named presets (`today`, `7days`, `14days`, `30days`, `90days`)
    pub fn preset(value: &str, today: NaiveDate, offset: FixedOffset) -> Result<Self, DateRangeError> {
        let (_, label, days) = RANGE_PRESETS
            .iter()
            .find(|(preset, _, _)| *preset == value)
            .ok_or_else(|| DateRangeError::UnknownPreset(value.to_string()))?;

        let mut range = Self::last_days(*days, today, offset)?;
        range.label = label.to_string();
        range.value = value.to_string();
        Ok(range)
    }

    /// Custom range from two RFC 3339 bounds, at most [`MAX_RANGE_DAYS`] long
    pub fn from_bounds(from: &str, to: &str) -> Result<Self, DateRangeError> {
        let from = DateTime::parse_from_rfc3339(from.trim())
            .map_err(|_| DateRangeError::InvalidBound(from.to_string()))?;
        let to = DateTime::parse_from_rfc3339(to.trim())
            .map_err(|_| DateRangeError::InvalidBound(to.to_string()))?;

        let span = (to.naive_local().date() - from.naive_local().date()).num_days() + 1;
        if span > i64::from(MAX_RANGE_DAYS) {
            return Err(DateRangeError::RangeTooLong(span));
        }
        Ok(Self::new(from, to, "Custom range", "custom"))
    }

    /// Calendar day of `from`
    pub fn start_date(&self) -> NaiveDate {
        self.from.naive_local().date()
    }

    /// Calendar day of `to`
    pub fn end_date(&self) -> NaiveDate {
        self.to.naive_local().date()
    }

    pub fn to_dto(&self) -> DateRangeDto {
        DateRangeDto {
            from: self.from.to_rfc3339(),
            to: self.to.to_rfc3339(),
            label: self.label.clone(),
            value: self.value.clone(),
        }
    }
}

fn at_local(
    date: NaiveDate,
    time: NaiveTime,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, DateRangeError> {
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(DateRangeError::InvalidLocalTime(date))
}

/// One calendar day of a range's output series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// Display label, e.g. "Jan 1"
    pub date: String,
    pub sort_key: NaiveDate,
}

impl DayBucket {
    pub fn new(sort_key: NaiveDate) -> Self {
        Self {
            date: format_day_label(sort_key),
            sort_key,
        }
    }

    /// Midnight opening this day
    pub fn start(&self) -> NaiveDateTime {
        self.sort_key.and_time(NaiveTime::MIN)
    }

    /// Midnight opening the next day (exclusive bound)
    pub fn end(&self) -> NaiveDateTime {
        self.start() + Duration::days(1)
    }

    /// Half-open membership: `start <= at < end`
    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        *at >= self.start() && *at < self.end()
    }
}

/// "Jan 1" style label used on chart axes
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Every calendar day from `range.from` through `range.to`, ascending.
///
/// A range whose start day is after its end day yields no days.
pub fn enumerate_days(range: &DateRange) -> Vec<DayBucket> {
    let end = range.end_date();
    range
        .start_date()
        .iter_days()
        .take_while(|day| *day <= end)
        .map(DayBucket::new)
        .collect()
}

/// Number of calendar days a range spans
pub fn days_in_range(range: &DateRange) -> u32 {
    let span = (range.end_date() - range.start_date()).num_days() + 1;
    span.max(0) as u32
}

/// Events whose start falls in `day`
pub fn events_in_day<'a>(events: &[&'a Event], day: &DayBucket) -> Vec<&'a Event> {
    events
        .iter()
        .copied()
        .filter(|event| day.contains(&event.local_occurred_at()))
        .collect()
}

/// Events whose start falls in any of `days`.
///
/// `days` is contiguous and ascending, so a single span check is enough.
pub fn events_within_days<'a>(events: &[&'a Event], days: &[DayBucket]) -> Vec<&'a Event> {
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Vec::new();
    };
    let (start, end) = (first.start(), last.end());

    events
        .iter()
        .copied()
        .filter(|event| {
            let at = event.local_occurred_at();
            at >= start && at < end
        })
        .collect()
}
