//! Store error types.

use crate::domain::{ChainError, LineId, StationId};

/// Errors that can occur when reading or mutating the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No station is registered under this id
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// No line exists with this id
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// Station is still part of a line and cannot be deleted
    #[error("station {station} is still on line {line}")]
    StationInUse { station: StationId, line: LineId },

    /// The line's section chain rejected the request
    #[error(transparent)]
    Chain(#[from] ChainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::StationNotFound(StationId::new(4));
        assert_eq!(err.to_string(), "station 4 not found");

        let err = StoreError::LineNotFound(LineId::new(2));
        assert_eq!(err.to_string(), "line 2 not found");

        let err = StoreError::StationInUse {
            station: StationId::new(4),
            line: LineId::new(2),
        };
        assert_eq!(err.to_string(), "station 4 is still on line 2");

        let err = StoreError::from(ChainError::SingleSection);
        assert_eq!(
            err.to_string(),
            "cannot remove a station from a line with a single section"
        );
    }
}
