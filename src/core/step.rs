use crate::cost::Cost;

/// How a `(slot, mask)` state of the solution space has been reached.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transition {
    /// The initial state: nothing placed at the very beginning of the horizon.
    Origin,

    /// The previous slot has been left idle.
    Idle,

    /// The event has just finished, occupying the slots right before the current one.
    Place { event: usize },
}

/// Best known way to reach a state, along with its cumulative cost.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Step {
    /// Cumulative cost of all the events placed before reaching the state.
    pub cost: Cost,

    pub transition: Transition,
}

impl Step {
    pub const ORIGIN: Self = Self { cost: Cost::ZERO, transition: Transition::Origin };
}
