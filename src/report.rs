use std::{collections::BTreeMap, time::Duration};

use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::schedule::{Schedule, ScheduledEvent},
    cost::Cost,
    error::Error,
};

/// Optimization outcome as handed over to the response formatting layer.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Success { results: Results },

    /// The input must be fixed.
    Invalid { error: String },

    /// The input is fine, but no schedule exists.
    Infeasible { error: String },
}

impl Report {
    /// Fold the solver outcome into a report.
    ///
    /// Internal defects are not the caller's business to format, so they are returned as is.
    pub fn try_from_outcome(
        outcome: Result<Schedule, Error>,
        slot_duration: Duration,
    ) -> Result<Self, Error> {
        match outcome {
            Ok(schedule) => Ok(Self::Success { results: Results::new(&schedule, slot_duration) }),
            Err(error) if error.is_internal() => Err(error),
            Err(error @ Error::Validation(_)) => Ok(Self::Invalid { error: error.to_string() }),
            Err(error) => Ok(Self::Infeasible { error: error.to_string() }),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct Results {
    pub total_cost: Cost,
    pub total_electricity_cost: Cost,
    pub total_labor_cost: Cost,
    pub num_events: usize,
    pub events: Vec<EventResult>,

    /// Active event indices for every slot of the horizon.
    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    pub combined_schedule: BTreeMap<usize, Vec<usize>>,
}

impl Results {
    pub fn new(schedule: &Schedule, slot_duration: Duration) -> Self {
        let total = schedule.total();
        Self {
            total_cost: total.total(),
            total_electricity_cost: total.electricity,
            total_labor_cost: total.labor,
            num_events: schedule.events().len(),
            events: schedule
                .events()
                .iter()
                .map(|event| EventResult::new(event, schedule.horizon(), slot_duration))
                .collect(),
            combined_schedule: schedule
                .occupancy()
                .iter()
                .enumerate()
                .map(|(slot, event)| (slot, event.iter().copied().collect()))
                .collect(),
        }
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct EventResult {
    /// One-based event number.
    pub event_id: usize,

    pub duration: usize,
    pub start_slot: usize,

    /// Last occupied slot, inclusive.
    pub end_slot: usize,

    pub start_hour: f64,

    /// Start of the last occupied slot.
    pub end_hour: f64,

    pub electricity_cost: Cost,
    pub labor_cost: Cost,
    pub total_cost: Cost,

    /// Whether the event is in progress, for every slot of the horizon.
    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    pub service_schedule: BTreeMap<usize, bool>,
}

impl EventResult {
    #[expect(clippy::cast_precision_loss)]
    fn new(event: &ScheduledEvent, horizon: usize, slot_duration: Duration) -> Self {
        let slot_hours = slot_duration.as_secs_f64() / 3600.0;
        // Durations are validated to be positive, so the window is never empty:
        let end_slot = event.window.last().unwrap_or(event.window.start);
        Self {
            event_id: event.event + 1,
            duration: event.duration,
            start_slot: event.window.start,
            end_slot,
            start_hour: event.window.start as f64 * slot_hours,
            end_hour: end_slot as f64 * slot_hours,
            electricity_cost: event.costs.electricity,
            labor_cost: event.costs.labor,
            total_cost: event.total_cost(),
            service_schedule: (0..horizon).map(|slot| (slot, event.window.contains(slot))).collect(),
        }
    }
}
