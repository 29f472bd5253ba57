//! Condensed per-day view across feedings, sleep and diapers for the
//! dashboard summary chart.

use shared::{OverviewDayRow, OverviewSeries};

use crate::domain::date_range::{enumerate_days, events_in_day, events_within_days, DateRange};
use crate::domain::models::event::{diapers, feedings, sleeps, Event};
use crate::domain::sleep_analytics::sleep_hours_for_day;

pub fn aggregate_overview(events: &[Event], range: &DateRange) -> OverviewSeries {
    let days = enumerate_days(range);
    let feedings = events_within_days(&feedings(events), &days);
    let sleeps = events_within_days(&sleeps(events), &days);
    let diapers = events_within_days(&diapers(events), &days);

    let daily = days
        .iter()
        .map(|day| OverviewDayRow {
            date: day.date.clone(),
            sort_key: day.sort_key,
            feedings: events_in_day(&feedings, day).len() as u32,
            sleep_hours: sleep_hours_for_day(&sleeps, day),
            diapers: events_in_day(&diapers, day).len() as u32,
        })
        .collect();

    OverviewSeries { daily }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::EventKind;
    use chrono::{DateTime, FixedOffset};
    use shared::{DiaperType, FeedingType};

    fn ts(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn event(id: i64, at: &str, kind: EventKind) -> Event {
        Event { id, baby_id: 1, occurred_at: ts(at), note: None, kind }
    }

    fn three_day_range() -> DateRange {
        DateRange::from_bounds("2024-01-01T00:00:00+00:00", "2024-01-03T23:59:59+00:00").unwrap()
    }

    #[test]
    fn test_overview_combines_all_domains_per_day() {
        let events = vec![
            event(1, "2024-01-01T08:00:00+00:00", EventKind::Feeding {
                feeding_type: FeedingType::Bottle,
                amount: Some(90.0),
                duration: None,
            }),
            event(2, "2024-01-01T09:00:00+00:00", EventKind::Diaper { diaper_type: DiaperType::Wet }),
            event(3, "2024-01-01T13:00:00+00:00", EventKind::Sleep {
                end_date: Some(ts("2024-01-01T14:20:00+00:00")),
            }),
            event(4, "2024-01-03T20:00:00+00:00", EventKind::Sleep { end_date: None }),
            event(5, "2024-01-03T21:00:00+00:00", EventKind::Feeding {
                feeding_type: FeedingType::Breast,
                amount: None,
                duration: Some(20.0),
            }),
        ];
        let series = aggregate_overview(&events, &three_day_range());

        assert_eq!(series.daily.len(), 3);

        let jan1 = &series.daily[0];
        assert_eq!((jan1.feedings, jan1.diapers), (1, 1));
        assert_eq!(jan1.sleep_hours, 1.3);

        let jan2 = &series.daily[1];
        assert_eq!((jan2.feedings, jan2.diapers), (0, 0));
        assert_eq!(jan2.sleep_hours, 0.0);

        let jan3 = &series.daily[2];
        assert_eq!((jan3.feedings, jan3.diapers), (1, 0));
        assert_eq!(jan3.sleep_hours, 0.0);
    }

    #[test]
    fn test_empty_input_still_has_a_row_per_day() {
        let series = aggregate_overview(&[], &three_day_range());

        let labels: Vec<&str> = series.daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(labels, vec!["Jan 1", "Jan 2", "Jan 3"]);
        assert!(series
            .daily
            .iter()
            .all(|d| d.feedings == 0 && d.diapers == 0 && d.sleep_hours == 0.0));
    }
}
