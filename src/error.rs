use std::fmt::{Display, Formatter};

use crate::cost::Cost;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input, reported before any solving work.
    #[error("invalid instance: {0}")]
    Validation(#[from] ValidationError),

    /// Valid input, but there is no way to fit all the events without overlapping.
    #[error("no non-overlapping placement of {n_events} events fits into {horizon} slots")]
    Infeasible { n_events: usize, horizon: usize },

    /// Cost model was asked about a window beyond the horizon, which means a solver defect.
    #[error("window {start}..{end} exceeds the horizon of {horizon} slots")]
    OutOfRange { start: usize, end: usize, horizon: usize },
}

impl Error {
    /// Whether the error indicates a defect rather than a problem with the input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("the horizon must contain at least one slot")]
    EmptyHorizon,

    #[error("{series} prices must cover slots 0..{horizon} exactly (missing: {missing:?}, extra: {extra:?})")]
    SlotCoverage { series: SeriesKind, horizon: usize, missing: Vec<usize>, extra: Vec<usize> },

    #[error("{series} price at slot {slot} must be finite and non-negative, got {price:?}")]
    InvalidPrice { series: SeriesKind, slot: usize, price: Cost },

    #[error("event #{event} duration must be within 1..={horizon} slots, got {duration}")]
    InvalidDuration { event: usize, duration: usize, horizon: usize },

    #[error("too many events: {n_events}, at most {max_events} are supported")]
    TooManyEvents { n_events: usize, max_events: usize },

    #[error("events take {total_duration} slots in total, but the horizon is only {horizon} slots")]
    InsufficientHorizon { total_duration: usize, horizon: usize },

    #[error("the solver would need {n_states} states, at most {max_states} are supported")]
    TooManyStates { n_states: usize, max_states: usize },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SeriesKind {
    Electricity,
    Labor,
}

impl Display for SeriesKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electricity => write!(f, "electricity"),
            Self::Labor => write!(f, "labor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_out_of_range_is_internal() {
        assert!(Error::OutOfRange { start: 3, end: 5, horizon: 4 }.is_internal());
        assert!(!Error::Infeasible { n_events: 2, horizon: 4 }.is_internal());
        assert!(!Error::from(ValidationError::EmptyHorizon).is_internal());
    }

    #[test]
    fn display_ok() {
        let error = Error::from(ValidationError::SlotCoverage {
            series: SeriesKind::Labor,
            horizon: 3,
            missing: vec![2],
            extra: vec![7],
        });
        assert_eq!(
            error.to_string(),
            "invalid instance: labor prices must cover slots 0..3 exactly (missing: [2], extra: [7])",
        );
    }
}
