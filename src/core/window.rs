use std::{
    fmt::{Debug, Formatter},
    ops::Range,
};

/// Half-open range of slot indices, `start..end`.
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Debug for Window {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for Window {
    fn from(range: Range<usize>) -> Self {
        Self { start: range.start, end: range.end }
    }
}

impl Window {
    pub const fn with_len(start: usize, len: usize) -> Self {
        Self { start, end: start + len }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub const fn contains(self, slot: usize) -> bool {
        (self.start <= slot) && (slot < self.end)
    }

    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        (self.start < other.end) && (other.start < self.end)
    }

    /// Index of the last occupied slot.
    #[must_use]
    pub const fn last(self) -> Option<usize> {
        if self.is_empty() { None } else { Some(self.end - 1) }
    }

    pub fn slots(self) -> Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_ok() {
        assert_eq!(Window::with_len(1, 2), Window::from(1..3));
        assert_eq!(Window::with_len(1, 2).len(), 2);
    }

    #[test]
    fn overlaps_ok() {
        assert!(Window::from(0..2).overlaps(Window::from(1..3)));
        assert!(!Window::from(0..2).overlaps(Window::from(2..4)));
        assert!(!Window::from(2..4).overlaps(Window::from(0..2)));
    }

    #[test]
    fn last_ok() {
        assert_eq!(Window::from(1..3).last(), Some(2));
        assert_eq!(Window::from(3..3).last(), None);
    }

    #[test]
    fn contains_ok() {
        assert!(Window::from(1..3).contains(1));
        assert!(Window::from(1..3).contains(2));
        assert!(!Window::from(1..3).contains(3));
        assert!(!Window::from(1..3).contains(0));
    }
}
