use itertools::Itertools;

use crate::{
    core::{
        cost_model::{CostBreakdown, CostModel},
        instance::Instance,
        window::Window,
    },
    cost::Cost,
    error::Error,
};

/// Event assigned to its slot window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Placement {
    pub event: usize,
    pub window: Window,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// Event index in the input list.
    pub event: usize,

    pub duration: usize,
    pub window: Window,
    pub costs: CostBreakdown,
}

impl ScheduledEvent {
    pub fn total_cost(&self) -> Cost {
        self.costs.total()
    }
}

/// Final non-overlapping schedule of all the events.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Scheduled events in input order.
    events: Vec<ScheduledEvent>,

    total: CostBreakdown,

    /// Index of the event occupying the slot, if any.
    occupancy: Vec<Option<usize>>,
}

impl Schedule {
    /// Build the schedule from the placements backtracked from the solution space.
    ///
    /// Placements may come in any order, the events are sorted by their indices.
    pub fn build(
        instance: &Instance,
        cost_model: &CostModel,
        placements: impl IntoIterator<Item = Placement>,
    ) -> Result<Self, Error> {
        let events: Vec<ScheduledEvent> = placements
            .into_iter()
            .sorted_by_key(|placement| placement.event)
            .map(|Placement { event, window }| {
                let costs = cost_model.window_breakdown(window.start, window.len())?;
                Ok(ScheduledEvent { event, duration: window.len(), window, costs })
            })
            .collect::<Result<_, Error>>()?;
        debug_assert_eq!(events.len(), instance.n_events());

        let mut occupancy = vec![None; instance.horizon()];
        for event in &events {
            for slot in event.window.slots() {
                debug_assert!(occupancy[slot].is_none(), "slot #{slot} is occupied twice");
                occupancy[slot] = Some(event.event);
            }
        }

        let total = events.iter().map(|event| event.costs).sum();
        Ok(Self { events, total, occupancy })
    }

    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    /// Aggregated electricity and labor costs over all the events.
    pub const fn total(&self) -> CostBreakdown {
        self.total
    }

    pub fn total_cost(&self) -> Cost {
        self.total.total()
    }

    #[must_use]
    pub fn occupancy(&self) -> &[Option<usize>] {
        &self.occupancy
    }

    /// Index of the event active during the slot.
    #[must_use]
    pub fn active_event(&self, slot: usize) -> Option<usize> {
        self.occupancy.get(slot).copied().flatten()
    }

    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.occupancy.len()
    }
}
