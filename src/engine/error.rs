use chrono::NaiveDate;

use crate::store::StoreError;

#[derive(Debug)]
pub enum EngineError {
    /// Start is before today, or end is before start.
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    },
    LimitExceeded(&'static str),
    /// A store collaborator failed; passed through as-is.
    Store(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidRange { start, end, today } => {
                if start < today {
                    write!(f, "invalid range [{start}, {end}]: start is before today ({today})")
                } else {
                    write!(f, "invalid range [{start}, {end}]: end is before start")
                }
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e)
    }
}
