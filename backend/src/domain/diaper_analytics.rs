//! Diaper change counts over a date range.

use shared::{DiaperDayRow, DiaperSummary, DiaperType, DistributionSlice};
use tracing::debug;

use crate::domain::date_range::{enumerate_days, events_in_day, events_within_days, DateRange};
use crate::domain::models::event::{diapers, Event, EventKind};

pub fn aggregate_diapers(events: &[Event], range: &DateRange) -> DiaperSummary {
    let days = enumerate_days(range);
    let diapers = events_within_days(&diapers(events), &days);

    let wet_diapers = count_type(&diapers, DiaperType::Wet);
    let dirty_diapers = count_type(&diapers, DiaperType::Dirty);
    let both_diapers = count_type(&diapers, DiaperType::Both);

    let daily = days
        .iter()
        .map(|day| {
            let day_diapers = events_in_day(&diapers, day);
            let wet = count_type(&day_diapers, DiaperType::Wet);
            let dirty = count_type(&day_diapers, DiaperType::Dirty);
            let both = count_type(&day_diapers, DiaperType::Both);
            DiaperDayRow {
                date: day.date.clone(),
                sort_key: day.sort_key,
                wet,
                dirty,
                both,
                total: wet + dirty + both,
            }
        })
        .collect();

    let distribution = DiaperType::ALL
        .iter()
        .map(|diaper_type| (diaper_type, count_type(&diapers, *diaper_type)))
        .filter(|(_, count)| *count > 0)
        .map(|(diaper_type, count)| DistributionSlice {
            name: diaper_type.label().to_string(),
            value: count,
            color: diaper_type.color().to_string(),
        })
        .collect();

    let total_diapers = wet_diapers + dirty_diapers + both_diapers;
    debug!(total_diapers, days = days.len(), "Aggregated diapers");

    DiaperSummary {
        total_diapers,
        wet_diapers,
        dirty_diapers,
        both_diapers,
        daily,
        distribution,
    }
}

fn count_type(events: &[&Event], diaper_type: DiaperType) -> u32 {
    events
        .iter()
        .filter(|e| matches!(&e.kind, EventKind::Diaper { diaper_type: t } if *t == diaper_type))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn diaper(id: i64, at: &str, diaper_type: DiaperType) -> Event {
        Event {
            id,
            baby_id: 1,
            occurred_at: DateTime::<FixedOffset>::parse_from_rfc3339(at).unwrap(),
            note: None,
            kind: EventKind::Diaper { diaper_type },
        }
    }

    fn two_day_range() -> DateRange {
        DateRange::from_bounds("2024-01-01T00:00:00+00:00", "2024-01-02T23:59:59+00:00").unwrap()
    }

    #[test]
    fn test_single_wet_diaper_end_to_end() {
        let events = vec![diaper(1, "2024-01-02T07:30:00+00:00", DiaperType::Wet)];
        let summary = aggregate_diapers(&events, &two_day_range());

        assert_eq!(summary.total_diapers, 1);
        assert_eq!(summary.wet_diapers, 1);

        let jan1 = &summary.daily[0];
        assert_eq!(jan1.date, "Jan 1");
        assert_eq!((jan1.wet, jan1.dirty, jan1.both, jan1.total), (0, 0, 0, 0));

        let jan2 = &summary.daily[1];
        assert_eq!(jan2.date, "Jan 2");
        assert_eq!((jan2.wet, jan2.total), (1, 1));
    }

    #[test]
    fn test_counts_partition_total() {
        let events = vec![
            diaper(1, "2024-01-01T01:00:00+00:00", DiaperType::Wet),
            diaper(2, "2024-01-01T05:00:00+00:00", DiaperType::Dirty),
            diaper(3, "2024-01-01T09:00:00+00:00", DiaperType::Both),
            diaper(4, "2024-01-02T09:00:00+00:00", DiaperType::Wet),
            diaper(5, "2024-01-02T13:00:00+00:00", DiaperType::Wet),
        ];
        let summary = aggregate_diapers(&events, &two_day_range());

        assert_eq!(summary.wet_diapers, 3);
        assert_eq!(summary.dirty_diapers, 1);
        assert_eq!(summary.both_diapers, 1);
        assert_eq!(
            summary.wet_diapers + summary.dirty_diapers + summary.both_diapers,
            summary.total_diapers
        );
        let day_total: u32 = summary.daily.iter().map(|d| d.total).sum();
        assert_eq!(day_total, summary.total_diapers);
    }

    #[test]
    fn test_distribution_skips_empty_types() {
        let events = vec![diaper(1, "2024-01-01T01:00:00+00:00", DiaperType::Dirty)];
        let summary = aggregate_diapers(&events, &two_day_range());

        assert_eq!(summary.distribution.len(), 1);
        assert_eq!(summary.distribution[0].name, "Dirty");
        assert_eq!(summary.distribution[0].value, 1);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = aggregate_diapers(&[], &two_day_range());

        assert_eq!(summary.total_diapers, 0);
        assert!(summary.distribution.is_empty());
        assert_eq!(summary.daily.len(), 2);
        assert!(summary.daily.iter().all(|d| d.total == 0));
    }
}
