//! Sleep statistics over a date range.
//!
//! Only completed sessions (with an end date) count toward totals. A session
//! is attributed entirely to the day it started on, even when it runs past
//! midnight.

use shared::{SleepDayRow, SleepSummary};
use tracing::debug;

use crate::domain::date_range::{enumerate_days, events_in_day, events_within_days, DateRange, DayBucket};
use crate::domain::models::event::{sleeps, Event};
use crate::domain::round_to;

pub fn aggregate_sleep(events: &[Event], range: &DateRange) -> SleepSummary {
    let days = enumerate_days(range);
    let sleeps = events_within_days(&sleeps(events), &days);

    let session_minutes: Vec<f64> = sleeps.iter().filter_map(|e| e.sleep_minutes()).collect();
    let total_minutes: f64 = session_minutes.iter().sum();
    let total_sleep_hours = total_minutes / 60.0;
    let total_sleep_sessions = session_minutes.len() as u32;

    let avg_sleep_duration = if session_minutes.is_empty() {
        0.0
    } else {
        (total_minutes / session_minutes.len() as f64).round()
    };
    let avg_sleep_per_day = if days.is_empty() {
        0.0
    } else {
        round_to(total_sleep_hours / days.len() as f64, 1)
    };

    let daily = days
        .iter()
        .map(|day| {
            let minutes: Vec<f64> = events_in_day(&sleeps, day)
                .iter()
                .filter_map(|e| e.sleep_minutes())
                .collect();
            let day_minutes: f64 = minutes.iter().sum();
            let avg_session_hours = if minutes.is_empty() {
                0.0
            } else {
                round_to(day_minutes / minutes.len() as f64 / 60.0, 2)
            };

            SleepDayRow {
                date: day.date.clone(),
                sort_key: day.sort_key,
                hours: round_to(day_minutes / 60.0, 2),
                sessions: minutes.len() as u32,
                avg_session_hours,
            }
        })
        .collect();

    debug!(total_sleep_sessions, total_sleep_hours, "Aggregated sleep");

    SleepSummary {
        total_sleep_hours: round_to(total_sleep_hours, 1),
        total_sleep_sessions,
        avg_sleep_duration,
        avg_sleep_per_day,
        daily,
    }
}

/// Hours of completed sleep that started on `day`, one decimal
pub(crate) fn sleep_hours_for_day(sleeps: &[&Event], day: &DayBucket) -> f64 {
    let minutes: f64 = events_in_day(sleeps, day)
        .iter()
        .filter_map(|e| e.sleep_minutes())
        .sum();
    round_to(minutes / 60.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::EventKind;
    use chrono::{DateTime, FixedOffset};

    fn ts(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn sleep(id: i64, start: &str, end: Option<&str>) -> Event {
        Event {
            id,
            baby_id: 1,
            occurred_at: ts(start),
            note: None,
            kind: EventKind::Sleep { end_date: end.map(ts) },
        }
    }

    fn two_day_range() -> DateRange {
        DateRange::from_bounds("2024-01-01T00:00:00+00:00", "2024-01-02T23:59:59+00:00").unwrap()
    }

    #[test]
    fn test_totals_over_completed_sessions() {
        let events = vec![
            sleep(1, "2024-01-01T13:00:00+00:00", Some("2024-01-01T14:30:00+00:00")),
            sleep(2, "2024-01-01T20:00:00+00:00", Some("2024-01-01T23:00:00+00:00")),
            sleep(3, "2024-01-02T10:00:00+00:00", Some("2024-01-02T11:30:00+00:00")),
        ];
        let summary = aggregate_sleep(&events, &two_day_range());

        assert_eq!(summary.total_sleep_sessions, 3);
        assert_eq!(summary.total_sleep_hours, 6.0);
        assert_eq!(summary.avg_sleep_duration, 120.0);
        assert_eq!(summary.avg_sleep_per_day, 3.0);

        let jan1 = &summary.daily[0];
        assert_eq!(jan1.sessions, 2);
        assert_eq!(jan1.hours, 4.5);
        assert_eq!(jan1.avg_session_hours, 2.25);

        let jan2 = &summary.daily[1];
        assert_eq!(jan2.sessions, 1);
        assert_eq!(jan2.hours, 1.5);
    }

    #[test]
    fn test_in_progress_session_is_excluded() {
        let events = vec![sleep(1, "2024-01-01T21:00:00+00:00", None)];
        let summary = aggregate_sleep(&events, &two_day_range());

        assert_eq!(summary.total_sleep_hours, 0.0);
        assert_eq!(summary.total_sleep_sessions, 0);
        assert_eq!(summary.avg_sleep_duration, 0.0);
        assert_eq!(summary.daily[0].sessions, 0);
        assert_eq!(summary.daily[0].hours, 0.0);
    }

    #[test]
    fn test_overnight_session_counts_on_start_day() {
        let events = vec![sleep(1, "2024-01-01T23:50:00+00:00", Some("2024-01-02T06:00:00+00:00"))];
        let summary = aggregate_sleep(&events, &two_day_range());

        assert_eq!(summary.daily[0].sessions, 1);
        assert_eq!(summary.daily[0].hours, 6.17);
        assert_eq!(summary.daily[1].sessions, 0);
        assert_eq!(summary.daily[1].hours, 0.0);
    }

    #[test]
    fn test_day_sessions_sum_to_total_sessions() {
        let events = vec![
            sleep(1, "2024-01-01T02:00:00+00:00", Some("2024-01-01T05:00:00+00:00")),
            sleep(2, "2024-01-02T02:00:00+00:00", Some("2024-01-02T03:00:00+00:00")),
            sleep(3, "2024-01-02T14:00:00+00:00", None),
        ];
        let summary = aggregate_sleep(&events, &two_day_range());

        let day_sessions: u32 = summary.daily.iter().map(|d| d.sessions).sum();
        assert_eq!(day_sessions, summary.total_sleep_sessions);
        assert_eq!(summary.total_sleep_sessions, 2);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = aggregate_sleep(&[], &two_day_range());

        assert_eq!(summary.total_sleep_hours, 0.0);
        assert_eq!(summary.avg_sleep_per_day, 0.0);
        assert_eq!(summary.daily.len(), 2);
        assert!(summary.daily.iter().all(|d| d.sessions == 0 && d.hours == 0.0 && d.avg_session_hours == 0.0));
    }

    #[test]
    fn test_average_duration_rounds_to_whole_minutes() {
        let events = vec![
            sleep(1, "2024-01-01T10:00:00+00:00", Some("2024-01-01T10:45:00+00:00")),
            sleep(2, "2024-01-01T12:00:00+00:00", Some("2024-01-01T12:46:00+00:00")),
        ];
        let summary = aggregate_sleep(&events, &two_day_range());

        // mean of 45 and 46 minutes
        assert_eq!(summary.avg_sleep_duration, 46.0);
    }
}
