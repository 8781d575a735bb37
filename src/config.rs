use chrono::{NaiveDate, TimeDelta};

use crate::limits::MAX_QUERY_WINDOW_DAYS;
use crate::model::DateRange;

/// Tunables for `AvailabilityEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Widest range (in days, inclusive) an occupancy query may enumerate.
    pub max_query_window_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_query_window_days: MAX_QUERY_WINDOW_DAYS,
        }
    }
}

impl EngineConfig {
    /// Read overrides from `VACANCY_*` environment variables; unset or
    /// unparsable values keep the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_query_window_days = std::env::var("VACANCY_MAX_WINDOW_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|days: &i64| *days > 0)
            .unwrap_or(defaults.max_query_window_days);
        Self {
            max_query_window_days,
        }
    }
}

/// `[start, start + days]`, or `None` if `days` is negative or the end date
/// would fall outside the calendar.
pub fn report_window(start: NaiveDate, days: i64) -> Option<DateRange> {
    if days < 0 {
        return None;
    }
    let end = start.checked_add_signed(TimeDelta::try_days(days)?)?;
    Some(DateRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    #[test]
    fn report_window_spans_requested_days() {
        let window = report_window(start(), 30).unwrap();
        assert_eq!(window.start, start());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2030, 1, 31).unwrap());
        assert_eq!(report_window(start(), 0).unwrap().len_days(), 1);
    }

    #[test]
    fn report_window_huge_day_count_is_refused() {
        assert_eq!(report_window(start(), 1_000_000_000_000), None);
        assert_eq!(report_window(start(), i64::MAX), None);
        assert_eq!(report_window(NaiveDate::MAX, 1), None);
        assert_eq!(report_window(start(), -1), None);
    }

    #[test]
    fn default_uses_window_limit() {
        assert_eq!(EngineConfig::default().max_query_window_days, MAX_QUERY_WINDOW_DAYS);
    }
}
