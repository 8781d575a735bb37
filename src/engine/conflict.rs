use chrono::NaiveDate;

use crate::model::*;

use super::EngineError;

/// Check a requested range against today. Runs before any store access.
///
/// Calendar days only: a range may start today, and a single-day range is fine.
pub(crate) fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<DateRange, EngineError> {
    if start < today || end < start {
        return Err(EngineError::InvalidRange { start, end, today });
    }
    Ok(DateRange::new(start, end))
}

/// Reject occupancy windows that would enumerate more than `max_days` days.
pub(crate) fn validate_window(range: &DateRange, max_days: i64) -> Result<(), EngineError> {
    if range.len_days() > max_days {
        return Err(EngineError::LimitExceeded("query window too wide"));
    }
    Ok(())
}
