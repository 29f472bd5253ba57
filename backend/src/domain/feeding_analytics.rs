//! Feeding statistics over a date range.

use shared::{DistributionSlice, FeedingDayRow, FeedingSummary, FeedingType};
use tracing::debug;

use crate::domain::date_range::{enumerate_days, events_in_day, events_within_days, DateRange};
use crate::domain::models::event::{feedings, Event, EventKind};
use crate::domain::round_to;

/// Summarize feedings for `range` and bucket them per calendar day
pub fn aggregate_feedings(events: &[Event], range: &DateRange) -> FeedingSummary {
    let days = enumerate_days(range);
    let feedings = events_within_days(&feedings(events), &days);

    let total_feedings = feedings.len() as u32;
    let avg_feedings_per_day = if days.is_empty() {
        0.0
    } else {
        round_to(f64::from(total_feedings) / days.len() as f64, 1)
    };

    let durations: Vec<f64> = feedings.iter().filter_map(|e| positive(duration_of(e))).collect();
    let avg_feeding_duration = mean(&durations).map(f64::round).unwrap_or(0.0);

    let amounts: Vec<f64> = feedings.iter().filter_map(|e| positive(amount_of(e))).collect();
    let avg_feeding_amount = format!("{:.1}", mean(&amounts).unwrap_or(0.0));

    let breast_count = count_type(&feedings, FeedingType::Breast);
    let bottle_count = count_type(&feedings, FeedingType::Bottle);
    let solid_count = count_type(&feedings, FeedingType::Solid);

    let daily: Vec<FeedingDayRow> = days
        .iter()
        .map(|day| {
            let day_feedings = events_in_day(&feedings, day);
            FeedingDayRow {
                date: day.date.clone(),
                sort_key: day.sort_key,
                breast: count_type(&day_feedings, FeedingType::Breast),
                bottle: count_type(&day_feedings, FeedingType::Bottle),
                solid: count_type(&day_feedings, FeedingType::Solid),
                total: day_feedings.len() as u32,
                amount: round_to(day_feedings.iter().filter_map(|e| positive(amount_of(e))).sum(), 1),
                duration: round_to(day_feedings.iter().filter_map(|e| positive(duration_of(e))).sum(), 1),
            }
        })
        .collect();

    let distribution = FeedingType::ALL
        .iter()
        .map(|feeding_type| (feeding_type, count_type(&feedings, *feeding_type)))
        .filter(|(_, count)| *count > 0)
        .map(|(feeding_type, count)| DistributionSlice {
            name: feeding_type.label().to_string(),
            value: count,
            color: feeding_type.color().to_string(),
        })
        .collect();

    debug!(total_feedings, days = days.len(), "Aggregated feedings");

    FeedingSummary {
        total_feedings,
        avg_feedings_per_day,
        avg_feeding_duration,
        avg_feeding_amount,
        breast_count,
        bottle_count,
        solid_count,
        daily,
        distribution,
    }
}

fn feeding_type_of(event: &Event) -> Option<FeedingType> {
    match &event.kind {
        EventKind::Feeding { feeding_type, .. } => Some(*feeding_type),
        _ => None,
    }
}

fn amount_of(event: &Event) -> Option<f64> {
    match &event.kind {
        EventKind::Feeding { amount, .. } => *amount,
        _ => None,
    }
}

fn duration_of(event: &Event) -> Option<f64> {
    match &event.kind {
        EventKind::Feeding { duration, .. } => *duration,
        _ => None,
    }
}

/// Keeps only usable measurements; NaN, infinities, zero and negatives drop out
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn count_type(events: &[&Event], feeding_type: FeedingType) -> u32 {
    events
        .iter()
        .filter(|e| feeding_type_of(e) == Some(feeding_type))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn ts(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn feeding(id: i64, at: &str, feeding_type: FeedingType, amount: Option<f64>, duration: Option<f64>) -> Event {
        Event {
            id,
            baby_id: 1,
            occurred_at: ts(at),
            note: None,
            kind: EventKind::Feeding { feeding_type, amount, duration },
        }
    }

    fn two_day_range() -> DateRange {
        DateRange::from_bounds("2024-01-01T00:00:00+00:00", "2024-01-02T23:59:59+00:00").unwrap()
    }

    #[test]
    fn test_single_bottle_feeding_end_to_end() {
        let events = vec![feeding(1, "2024-01-01T09:00:00+00:00", FeedingType::Bottle, Some(100.0), Some(15.0))];
        let summary = aggregate_feedings(&events, &two_day_range());

        assert_eq!(summary.total_feedings, 1);
        assert_eq!(summary.bottle_count, 1);
        assert_eq!(summary.daily.len(), 2);

        let jan1 = &summary.daily[0];
        assert_eq!(jan1.date, "Jan 1");
        assert_eq!((jan1.breast, jan1.bottle, jan1.solid, jan1.total), (0, 1, 0, 1));
        assert_eq!(jan1.amount, 100.0);
        assert_eq!(jan1.duration, 15.0);

        let jan2 = &summary.daily[1];
        assert_eq!(jan2.date, "Jan 2");
        assert_eq!((jan2.bottle, jan2.total), (0, 0));
        assert_eq!(jan2.amount, 0.0);
        assert_eq!(jan2.duration, 0.0);
    }

    #[test]
    fn test_average_duration_over_positive_durations() {
        let events = vec![
            feeding(1, "2024-01-01T08:00:00+00:00", FeedingType::Breast, None, Some(10.0)),
            feeding(2, "2024-01-01T11:00:00+00:00", FeedingType::Breast, None, Some(20.0)),
            feeding(3, "2024-01-02T08:00:00+00:00", FeedingType::Breast, None, Some(30.0)),
            feeding(4, "2024-01-02T12:00:00+00:00", FeedingType::Solid, None, Some(0.0)),
        ];
        let summary = aggregate_feedings(&events, &two_day_range());

        assert_eq!(summary.avg_feeding_duration, 20.0);
        assert_eq!(summary.avg_feedings_per_day, 2.0);
    }

    #[test]
    fn test_average_amount_ignores_missing_and_malformed_values() {
        let events = vec![
            feeding(1, "2024-01-01T08:00:00+00:00", FeedingType::Bottle, Some(90.0), None),
            feeding(2, "2024-01-01T11:00:00+00:00", FeedingType::Bottle, Some(f64::NAN), None),
            feeding(3, "2024-01-01T14:00:00+00:00", FeedingType::Bottle, Some(-20.0), None),
            feeding(4, "2024-01-01T17:00:00+00:00", FeedingType::Solid, Some(35.0), None),
            feeding(5, "2024-01-01T20:00:00+00:00", FeedingType::Breast, None, None),
        ];
        let summary = aggregate_feedings(&events, &two_day_range());

        assert_eq!(summary.avg_feeding_amount, "62.5");
        assert_eq!(summary.daily[0].amount, 125.0);
        assert_eq!(summary.avg_feeding_duration, 0.0);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = aggregate_feedings(&[], &two_day_range());

        assert_eq!(summary.total_feedings, 0);
        assert_eq!(summary.avg_feedings_per_day, 0.0);
        assert_eq!(summary.avg_feeding_duration, 0.0);
        assert_eq!(summary.avg_feeding_amount, "0.0");
        assert!(summary.distribution.is_empty());
        assert_eq!(summary.daily.len(), 2);
        assert!(summary.daily.iter().all(|d| d.total == 0 && d.amount == 0.0 && d.duration == 0.0));
    }

    #[test]
    fn test_type_partition_and_day_totals_are_conserved() {
        let events = vec![
            feeding(1, "2024-01-01T01:00:00+00:00", FeedingType::Breast, None, Some(12.0)),
            feeding(2, "2024-01-01T04:00:00+00:00", FeedingType::Bottle, Some(60.0), None),
            feeding(3, "2024-01-02T07:00:00+00:00", FeedingType::Solid, Some(40.0), None),
            feeding(4, "2024-01-02T10:00:00+00:00", FeedingType::Breast, None, Some(18.0)),
            feeding(5, "2024-01-02T13:00:00+00:00", FeedingType::Bottle, Some(120.0), None),
        ];
        let summary = aggregate_feedings(&events, &two_day_range());

        assert_eq!(
            summary.breast_count + summary.bottle_count + summary.solid_count,
            summary.total_feedings
        );
        let day_total: u32 = summary.daily.iter().map(|d| d.total).sum();
        assert_eq!(day_total, summary.total_feedings);
    }

    #[test]
    fn test_distribution_skips_types_without_feedings() {
        let events = vec![
            feeding(1, "2024-01-01T08:00:00+00:00", FeedingType::Breast, None, Some(10.0)),
            feeding(2, "2024-01-01T10:00:00+00:00", FeedingType::Breast, None, Some(10.0)),
            feeding(3, "2024-01-01T12:00:00+00:00", FeedingType::Solid, Some(30.0), None),
        ];
        let summary = aggregate_feedings(&events, &two_day_range());

        let names: Vec<&str> = summary.distribution.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Breast", "Solid"]);
        assert_eq!(summary.distribution[0].value, 2);
        assert_eq!(summary.distribution[0].color, FeedingType::Breast.color());
    }

    #[test]
    fn test_midnight_feeding_belongs_to_the_day_it_opens() {
        let events = vec![feeding(1, "2024-01-02T00:00:00+00:00", FeedingType::Bottle, Some(80.0), None)];
        let summary = aggregate_feedings(&events, &two_day_range());

        assert_eq!(summary.daily[0].total, 0);
        assert_eq!(summary.daily[1].total, 1);
    }

    #[test]
    fn test_feedings_outside_range_are_ignored() {
        let events = vec![
            feeding(1, "2023-12-31T23:00:00+00:00", FeedingType::Bottle, Some(80.0), None),
            feeding(2, "2024-01-03T00:00:00+00:00", FeedingType::Bottle, Some(80.0), None),
        ];
        let summary = aggregate_feedings(&events, &two_day_range());

        assert_eq!(summary.total_feedings, 0);
        assert_eq!(summary.avg_feeding_amount, "0.0");
    }
}
