use std::time::Instant;

use bon::Builder;

use crate::{
    core::{
        cost_model::CostModel,
        instance::Instance,
        mask::Mask,
        schedule::Schedule,
        solution_space::SolutionSpace,
        step::{Step, Transition},
    },
    cost::Cost,
    error::Error,
    prelude::*,
};

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Solver<'a> {
    instance: &'a Instance,

    /// Skip the states from which the remaining events cannot fit into the remaining slots.
    ///
    /// Never changes the optimum, only saves the work.
    #[builder(default = true)]
    prune: bool,
}

impl<S: solver_builder::IsComplete> SolverBuilder<'_, S> {
    /// Find the cheapest non-overlapping schedule.
    pub fn solve(self) -> Result<Schedule, Error> {
        self.build().solve()
    }

    /// Find only the minimum total cost, without reconstructing the schedule.
    pub fn minimum_cost(self) -> Result<Cost, Error> {
        self.build().minimum_cost()
    }
}

impl Solver<'_> {
    /// Place all the events onto the timeline at the minimum total cost.
    ///
    /// Goes forward in time, computing the minimum cost of each `(slot, mask)` state, where the mask
    /// tells which events have already been placed before the slot. From each state, the timeline
    /// may either advance by one idle slot, or an unplaced event may start at the slot and advance
    /// the timeline by its duration.
    ///
    /// The [DP][1] state space:
    ///
    /// - Time dimension: each slot of the horizon, plus the end of the horizon
    /// - Event dimension: every subset of the events
    ///
    /// A state is updated only when strictly improved, so on ties the transition enumerated first
    /// wins: earlier slot, then lower mask, idle before placements, and placements by event index.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Dynamic_programming
    #[instrument(skip_all, fields(horizon = self.instance.horizon(), n_events = self.instance.n_events()))]
    fn solve(self) -> Result<Schedule, Error> {
        let start_instant = Instant::now();
        info!("optimizing…");

        let cost_model = CostModel::new(self.instance);
        let horizon = self.instance.horizon();
        let durations = self.instance.durations();
        let full_mask = Mask::full(durations.len());
        let remaining_durations = self.remaining_durations();

        let mut solutions = SolutionSpace::new(horizon, durations.len());
        solutions.relax(0, Mask::EMPTY, Step::ORIGIN);

        // Nothing leaves the end of the horizon, hence the exclusive range:
        for slot in 0..horizon {
            for mask in full_mask.iter_up_to() {
                let Some(&Step { cost, .. }) = solutions.get(slot, mask) else {
                    continue;
                };
                if self.prune && slot + remaining_durations[mask.index()] > horizon {
                    continue;
                }
                solutions.relax(slot + 1, mask, Step { cost, transition: Transition::Idle });
                for (event, duration) in self.unplaced_events(mask, slot) {
                    let cost = cost + cost_model.window_cost(slot, duration)?;
                    solutions.relax(
                        slot + duration,
                        mask.with(event),
                        Step { cost, transition: Transition::Place { event } },
                    );
                }
            }
        }

        let infeasible = || Error::Infeasible { n_events: durations.len(), horizon };
        let minimum_cost = solutions.get(horizon, full_mask).ok_or_else(infeasible)?.cost;
        let placements = solutions.backtrack(durations).ok_or_else(infeasible)?;
        let schedule = Schedule::build(self.instance, &cost_model, placements)?;

        info!(elapsed = ?start_instant.elapsed(), %minimum_cost, "optimized");
        Ok(schedule)
    }

    /// Same forward pass as [`Solver::solve`], but keeping only the last `max_duration + 1` slots
    /// of the solution space and no decision trace.
    #[instrument(skip_all, fields(horizon = self.instance.horizon(), n_events = self.instance.n_events()))]
    fn minimum_cost(self) -> Result<Cost, Error> {
        let cost_model = CostModel::new(self.instance);
        let horizon = self.instance.horizon();
        let durations = self.instance.durations();
        let full_mask = Mask::full(durations.len());
        let n_masks = Mask::n_masks(durations.len());
        let remaining_durations = self.remaining_durations();

        // Idle advance moves by one slot, so there must always be at least two layers:
        let n_layers = durations.iter().copied().max().unwrap_or(0).max(1) + 1;
        let mut layers: Vec<Vec<Option<Cost>>> = vec![vec![None; n_masks]; n_layers];
        layers[0][Mask::EMPTY.index()] = Some(Cost::ZERO);

        let relax = |target: &mut Option<Cost>, candidate: Cost| {
            if target.is_none_or(|cost| candidate < cost) {
                *target = Some(candidate);
            }
        };

        for slot in 0..horizon {
            let current = std::mem::replace(&mut layers[slot % n_layers], vec![None; n_masks]);
            for mask in full_mask.iter_up_to() {
                let Some(cost) = current[mask.index()] else {
                    continue;
                };
                if self.prune && slot + remaining_durations[mask.index()] > horizon {
                    continue;
                }
                relax(&mut layers[(slot + 1) % n_layers][mask.index()], cost);
                for (event, duration) in self.unplaced_events(mask, slot) {
                    let cost = cost + cost_model.window_cost(slot, duration)?;
                    relax(&mut layers[(slot + duration) % n_layers][mask.with(event).index()], cost);
                }
            }
        }

        layers[horizon % n_layers][full_mask.index()]
            .ok_or(Error::Infeasible { n_events: durations.len(), horizon })
    }

    /// Events that are not in the mask yet and still fit into the horizon when started at the slot.
    fn unplaced_events(&self, mask: Mask, slot: usize) -> impl Iterator<Item = (usize, usize)> {
        let horizon = self.instance.horizon();
        self.instance
            .durations()
            .iter()
            .copied()
            .enumerate()
            .filter(move |(event, duration)| !mask.contains(*event) && slot + duration <= horizon)
    }

    /// Total duration of the events not yet placed, for each mask.
    fn remaining_durations(&self) -> Vec<usize> {
        let durations = self.instance.durations();
        let total: usize = durations.iter().sum();
        Mask::full(durations.len())
            .iter_up_to()
            .map(|mask| {
                total
                    - durations
                        .iter()
                        .enumerate()
                        .filter(|(event, _)| mask.contains(*event))
                        .map(|(_, duration)| duration)
                        .sum::<usize>()
            })
            .collect()
    }
}
