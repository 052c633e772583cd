use crate::core::{
    mask::Mask,
    schedule::Placement,
    step::{Step, Transition},
    window::Window,
};

/// Dynamic programming table over `(slot, mask)` states along with the decision trace.
///
/// Slot indices go from `0` to `horizon` inclusive: the state at `horizon` means «the whole
/// timeline has been walked through».
pub struct SolutionSpace {
    horizon: usize,
    n_masks: usize,
    flat_matrix: Vec<Option<Step>>,
}

impl SolutionSpace {
    pub fn new(horizon: usize, n_events: usize) -> Self {
        let n_masks = Mask::n_masks(n_events);
        Self { horizon, n_masks, flat_matrix: vec![None; (horizon + 1) * n_masks] }
    }

    /// Get the best known step into the state, if the state has been reached at all.
    pub fn get(&self, slot: usize, mask: Mask) -> Option<&Step> {
        self.flat_matrix[self.flat_index(slot, mask)].as_ref()
    }

    /// Replace the step into the state if the candidate is strictly cheaper.
    ///
    /// Ties keep the earlier step, which makes the result depend only on the enumeration order.
    ///
    /// # Returns
    ///
    /// Whether the state has been improved.
    pub fn relax(&mut self, slot: usize, mask: Mask, candidate: Step) -> bool {
        let flat_index = self.flat_index(slot, mask);
        let cell = &mut self.flat_matrix[flat_index];
        if cell.as_ref().is_some_and(|step| step.cost <= candidate.cost) {
            return false;
        }
        *cell = Some(candidate);
        true
    }

    /// Walk the decision trace back from `(horizon, full_mask)` to the origin.
    ///
    /// # Returns
    ///
    /// - [`Some`] placements in reverse chronological order, if the final state has been reached.
    /// - [`None`], if there is no solution.
    pub fn backtrack(self, durations: &[usize]) -> Option<Vec<Placement>> {
        let mut slot = self.horizon;
        let mut mask = Mask::full(durations.len());
        let mut placements = Vec::with_capacity(durations.len());
        loop {
            match self.get(slot, mask)?.transition {
                Transition::Origin => {
                    debug_assert!(slot == 0 && mask.is_empty());
                    break Some(placements);
                }
                Transition::Idle => {
                    slot -= 1;
                }
                Transition::Place { event } => {
                    let window = Window::with_len(slot - durations[event], durations[event]);
                    placements.push(Placement { event, window });
                    slot = window.start;
                    mask = mask.without(event);
                }
            }
        }
    }

    fn flat_index(&self, slot: usize, mask: Mask) -> usize {
        debug_assert!(slot <= self.horizon, "slot is out of bounds ({slot})");
        debug_assert!(mask.index() < self.n_masks, "mask is out of bounds ({mask:?})");
        slot * self.n_masks + mask.index()
    }
}
