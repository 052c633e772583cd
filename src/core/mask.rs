use std::fmt::{Debug, Formatter};

/// Largest number of events a [`Mask`] can hold.
pub const MAX_EVENTS: usize = 31;

/// Set of already placed events, one bit per event index.
#[must_use]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Mask(pub u32);

impl Debug for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

impl Mask {
    pub const EMPTY: Self = Self(0);

    /// Mask with all the `n_events` bits set.
    pub const fn full(n_events: usize) -> Self {
        debug_assert!(n_events <= MAX_EVENTS);
        Self((1 << n_events) - 1)
    }

    /// Number of distinct masks over `n_events` events.
    #[must_use]
    pub const fn n_masks(n_events: usize) -> usize {
        1 << n_events
    }

    /// Iterate over all the masks from the empty one up to and including `self`.
    pub fn iter_up_to(self) -> impl Iterator<Item = Self> {
        (0..=self.0).map(Self)
    }

    #[must_use]
    pub const fn contains(self, event: usize) -> bool {
        self.0 & (1 << event) != 0
    }

    pub const fn with(self, event: usize) -> Self {
        Self(self.0 | (1 << event))
    }

    pub const fn without(self, event: usize) -> Self {
        Self(self.0 & !(1 << event))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
