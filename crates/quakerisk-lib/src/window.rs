//! Time-window selection of earthquake events.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::{Error, Result};
use crate::records::EarthquakeRecord;

/// Default lookback for the active window, in hours (three days).
pub const DEFAULT_LOOKBACK_HOURS: i64 = 72;

/// Closed interval `[end - lookback, end]` of event times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    end: DateTime<Utc>,
    lookback: Duration,
}

impl TimeWindow {
    /// Window of the default three-day lookback ending at `end`.
    pub fn ending_at(end: DateTime<Utc>) -> Self {
        Self {
            end,
            lookback: Duration::hours(DEFAULT_LOOKBACK_HOURS),
        }
    }

    /// Window with an explicit lookback; the lookback must not be negative.
    pub fn new(end: DateTime<Utc>, lookback: Duration) -> Result<Self> {
        if lookback < Duration::zero() {
            return Err(Error::InvalidWindow {
                message: format!("lookback must not be negative (got {lookback})"),
            });
        }
        Ok(Self { end, lookback })
    }

    /// Window ending at the given epoch milliseconds.
    pub fn ending_at_millis(end_millis: i64, lookback: Duration) -> Result<Self> {
        let end = Utc
            .timestamp_millis_opt(end_millis)
            .single()
            .ok_or_else(|| Error::InvalidWindow {
                message: format!("timestamp {end_millis} is out of range"),
            })?;
        Self::new(end, lookback)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.end - self.lookback
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn lookback(&self) -> Duration {
        self.lookback
    }

    /// Whether an epoch-millisecond timestamp falls inside the window
    /// (both bounds inclusive).
    pub fn contains_millis(&self, timestamp_millis: i64) -> bool {
        let start = self.start().timestamp_millis();
        let end = self.end.timestamp_millis();
        timestamp_millis >= start && timestamp_millis <= end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start().format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Earthquakes whose timestamp lies inside `window`, in input order.
///
/// Events without a timestamp are excluded.
pub fn filter_earthquakes(
    window: &TimeWindow,
    earthquakes: &[EarthquakeRecord],
) -> Vec<EarthquakeRecord> {
    earthquakes
        .iter()
        .filter(|quake| {
            quake
                .timestamp_millis
                .is_some_and(|ts| window.contains_millis(ts))
        })
        .cloned()
        .collect()
}

/// Latest timestamp present in the feed, if any.
pub fn latest_timestamp(earthquakes: &[EarthquakeRecord]) -> Option<DateTime<Utc>> {
    earthquakes
        .iter()
        .filter_map(|quake| quake.timestamp_millis)
        .max()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 3_600_000;

    fn quake_at(millis: i64) -> EarthquakeRecord {
        EarthquakeRecord::new(0.0, 0.0, 5.0).at_millis(millis)
    }

    #[test]
    fn bounds_are_inclusive() {
        let end = 100 * HOUR_MS;
        let window = TimeWindow::ending_at_millis(end, Duration::hours(72)).expect("window");
        let quakes = vec![
            quake_at(end - 72 * HOUR_MS - 1),
            quake_at(end - 72 * HOUR_MS),
            quake_at(end),
            quake_at(end + 1),
        ];
        let selected = filter_earthquakes(&window, &quakes);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].timestamp_millis, Some(end - 72 * HOUR_MS));
        assert_eq!(selected[1].timestamp_millis, Some(end));
    }

    #[test]
    fn untimed_events_are_excluded() {
        let window = TimeWindow::ending_at(Utc::now());
        let quakes = vec![EarthquakeRecord::new(0.0, 0.0, 5.0)];
        assert!(filter_earthquakes(&window, &quakes).is_empty());
    }

    #[test]
    fn negative_lookback_is_rejected() {
        let err = TimeWindow::new(Utc::now(), Duration::hours(-1)).expect_err("negative lookback");
        assert!(matches!(err, Error::InvalidWindow { .. }));
    }

    #[test]
    fn latest_timestamp_ignores_untimed_events() {
        let quakes = vec![
            quake_at(5 * HOUR_MS),
            EarthquakeRecord::new(0.0, 0.0, 3.0),
            quake_at(2 * HOUR_MS),
        ];
        let latest = latest_timestamp(&quakes).expect("latest");
        assert_eq!(latest.timestamp_millis(), 5 * HOUR_MS);
        assert!(latest_timestamp(&[]).is_none());
    }
}
