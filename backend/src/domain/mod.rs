//! # Domain Layer
//!
//! Baby-care analytics: the event model, the date-range enumerator and the
//! four aggregators (feeding, sleep, diaper, overview), plus the services
//! that feed them from storage.
//!
//! The aggregators are plain synchronous functions over events already in
//! memory. They never fail; missing data degrades to zeros and empty series.

pub mod analytics_service;
pub mod commands;
pub mod date_range;
pub mod diaper_analytics;
pub mod event_service;
pub mod feeding_analytics;
pub mod models;
pub mod overview_analytics;
pub mod sleep_analytics;

pub use analytics_service::AnalyticsService;
pub use date_range::{DateRange, DateRangeError, DayBucket};
pub use event_service::{EventService, EventServiceError};

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(7.5, 0), 8.0);
        assert_eq!(round_to(0.0, 1), 0.0);
    }
}
