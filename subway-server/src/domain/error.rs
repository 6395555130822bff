//! Domain error types.
//!
//! These errors are request-validation outcomes of section chain
//! maintenance. They are distinct from storage and HTTP errors, and no
//! mutation has been applied when one of them is returned.

use super::{Distance, StationId};

/// Errors raised while building or mutating a line's section chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// Section is malformed (e.g., both ends at the same station)
    #[error("invalid section: {0}")]
    InvalidSection(&'static str),

    /// Inserting would branch, close a cycle, or disconnect the line
    #[error("section {up} -> {down} cannot be added: {reason}")]
    DuplicateSection {
        up: StationId,
        down: StationId,
        reason: &'static str,
    },

    /// Split distance does not fit inside the section being split
    #[error("distance {requested} must be shorter than the existing section ({existing})")]
    InvalidDistance {
        requested: Distance,
        existing: Distance,
    },

    /// Station is not part of this line
    #[error("station {0} is not on this line")]
    StationNotFound(StationId),

    /// Removal would leave the line without sections
    #[error("cannot remove a station from a line with a single section")]
    SingleSection,

    /// Merged distance does not fit in a `Distance`
    #[error("merged distance overflows")]
    DistanceOverflow,

    /// Section set is not a single simple path
    #[error("section chain is corrupt: {0}")]
    ChainIntegrity(&'static str),
}

impl ChainError {
    /// Returns true for errors caused by the request rather than by
    /// corrupted internal state.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ChainError::ChainIntegrity(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ChainError::InvalidSection("stations must differ");
        assert_eq!(err.to_string(), "invalid section: stations must differ");

        let err = ChainError::DuplicateSection {
            up: StationId::new(1),
            down: StationId::new(2),
            reason: "both stations are already on the line",
        };
        assert_eq!(
            err.to_string(),
            "section 1 -> 2 cannot be added: both stations are already on the line"
        );

        let err = ChainError::InvalidDistance {
            requested: Distance::new(10).unwrap(),
            existing: Distance::new(7).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "distance 10 must be shorter than the existing section (7)"
        );

        let err = ChainError::StationNotFound(StationId::new(5));
        assert_eq!(err.to_string(), "station 5 is not on this line");

        let err = ChainError::SingleSection;
        assert_eq!(
            err.to_string(),
            "cannot remove a station from a line with a single section"
        );
    }

    #[test]
    fn only_integrity_errors_are_internal() {
        assert!(ChainError::SingleSection.is_client_error());
        assert!(ChainError::StationNotFound(StationId::new(1)).is_client_error());
        assert!(!ChainError::ChainIntegrity("cycle").is_client_error());
    }
}
