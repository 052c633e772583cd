use std::collections::BTreeMap;

use crate::{
    core::mask::{MAX_EVENTS, Mask},
    cost::Cost,
    error::{SeriesKind, ValidationError},
    prelude::*,
};

/// Default limit on the number of events. The solver memory grows as `2^K`.
pub const DEFAULT_MAX_EVENTS: usize = 12;

/// Limit on the number of `(slot, mask)` states the solver may allocate.
pub const MAX_STATES: usize = 1 << 24;

/// Validated scheduling problem: the price series over the horizon and the event durations.
///
/// Construct it with [`Instance::try_new`], which performs all the cheap, obviously necessary
/// checks before any solving work is done.
#[derive(Debug, Clone)]
pub struct Instance {
    electricity: Vec<Cost>,
    labor: Vec<Cost>,
    durations: Vec<usize>,
}

impl Instance {
    /// Validate the raw input.
    ///
    /// The horizon length is implied by the number of electricity prices. The checks run in order:
    ///
    /// 1. The horizon is not empty.
    /// 2. Electricity prices cover exactly the slots `0..H`.
    /// 3. Labor prices cover exactly the same slots.
    /// 4. All prices are finite and non-negative.
    /// 5. Every event duration is within `1..=H`.
    /// 6. There are no more than `max_events` events.
    /// 7. The events fit into the horizon if packed back to back.
    /// 8. The solver state space, `(H + 1) * 2^K`, stays within [`MAX_STATES`].
    pub fn try_new(
        electricity: &BTreeMap<usize, Cost>,
        labor: &BTreeMap<usize, Cost>,
        durations: &[usize],
        max_events: usize,
    ) -> Result<Self, ValidationError> {
        let horizon = electricity.len();
        if horizon == 0 {
            return Err(ValidationError::EmptyHorizon);
        }
        let electricity = Self::collect_series(SeriesKind::Electricity, electricity, horizon)?;
        let labor = Self::collect_series(SeriesKind::Labor, labor, horizon)?;

        for (series, prices) in [(SeriesKind::Electricity, &electricity), (SeriesKind::Labor, &labor)]
        {
            if let Some((slot, price)) = prices
                .iter()
                .copied()
                .enumerate()
                .find(|(_, price)| !price.is_finite() || price.is_sign_negative())
            {
                return Err(ValidationError::InvalidPrice { series, slot, price });
            }
        }

        if let Some((event, duration)) = durations
            .iter()
            .copied()
            .enumerate()
            .find(|(_, duration)| !(1..=horizon).contains(duration))
        {
            return Err(ValidationError::InvalidDuration { event, duration, horizon });
        }

        let max_events = max_events.min(MAX_EVENTS);
        if durations.len() > max_events {
            return Err(ValidationError::TooManyEvents { n_events: durations.len(), max_events });
        }

        let total_duration: usize = durations.iter().sum();
        if total_duration > horizon {
            return Err(ValidationError::InsufficientHorizon { total_duration, horizon });
        }

        let n_states = (horizon + 1).saturating_mul(Mask::n_masks(durations.len()));
        if n_states > MAX_STATES {
            return Err(ValidationError::TooManyStates { n_states, max_states: MAX_STATES });
        }

        debug!(horizon, n_events = durations.len(), total_duration, "validated");
        Ok(Self { electricity, labor, durations: durations.to_vec() })
    }

    /// Check that the series covers exactly `0..horizon` and flatten it.
    fn collect_series(
        series: SeriesKind,
        prices: &BTreeMap<usize, Cost>,
        horizon: usize,
    ) -> Result<Vec<Cost>, ValidationError> {
        let missing: Vec<usize> = (0..horizon).filter(|slot| !prices.contains_key(slot)).collect();
        let extra: Vec<usize> = prices.range(horizon..).map(|(slot, _)| *slot).collect();
        if missing.is_empty() && extra.is_empty() {
            // Keys are `0..horizon` in order, so the values line up with the slot indices:
            Ok(prices.values().copied().collect())
        } else {
            Err(ValidationError::SlotCoverage { series, horizon, missing, extra })
        }
    }

    /// Number of slots in the horizon.
    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.electricity.len()
    }

    #[must_use]
    pub fn electricity(&self) -> &[Cost] {
        &self.electricity
    }

    #[must_use]
    pub fn labor(&self) -> &[Cost] {
        &self.labor
    }

    #[must_use]
    pub fn durations(&self) -> &[usize] {
        &self.durations
    }

    #[must_use]
    pub const fn n_events(&self) -> usize {
        self.durations.len()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn series(prices: &[f64]) -> BTreeMap<usize, Cost> {
        prices.iter().copied().map(Cost::from).enumerate().collect()
    }

    pub fn instance(electricity: &[f64], labor: &[f64], durations: &[usize]) -> Instance {
        Instance::try_new(&series(electricity), &series(labor), durations, DEFAULT_MAX_EVENTS)
            .unwrap()
    }

    #[test]
    fn valid_ok() {
        let instance = instance(&[5.0, 1.0, 1.0, 5.0], &[0.0; 4], &[2, 1]);
        assert_eq!(instance.horizon(), 4);
        assert_eq!(instance.n_events(), 2);
        assert_eq!(instance.electricity()[1], Cost::from(1));
    }

    #[test]
    fn no_events_ok() {
        assert_eq!(instance(&[1.0], &[1.0], &[]).n_events(), 0);
    }

    #[test]
    fn empty_horizon() {
        let result = Instance::try_new(&series(&[]), &series(&[]), &[1], DEFAULT_MAX_EVENTS);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyHorizon);
    }

    #[test]
    fn electricity_gap() {
        let electricity: BTreeMap<_, _> = [(0, Cost::from(1)), (2, Cost::from(1))].into();
        let result = Instance::try_new(&electricity, &series(&[1.0, 1.0]), &[1], DEFAULT_MAX_EVENTS);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::SlotCoverage {
                series: SeriesKind::Electricity,
                horizon: 2,
                missing: vec![1],
                extra: vec![2],
            },
        );
    }

    #[test]
    fn mismatched_labor_coverage() {
        let result =
            Instance::try_new(&series(&[1.0, 1.0, 1.0]), &series(&[1.0, 1.0]), &[1], DEFAULT_MAX_EVENTS);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::SlotCoverage {
                series: SeriesKind::Labor,
                horizon: 3,
                missing: vec![2],
                extra: vec![],
            },
        );
    }

    #[test]
    fn extra_labor_slot() {
        let result = Instance::try_new(
            &series(&[1.0, 1.0]),
            &series(&[1.0, 1.0, 1.0]),
            &[1],
            DEFAULT_MAX_EVENTS,
        );
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::SlotCoverage { series: SeriesKind::Labor, extra, .. } if extra == vec![2],
        ));
    }

    #[test]
    fn negative_price() {
        let result = Instance::try_new(
            &series(&[1.0, 1.0]),
            &series(&[1.0, -0.5]),
            &[1],
            DEFAULT_MAX_EVENTS,
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvalidPrice {
                series: SeriesKind::Labor,
                slot: 1,
                price: Cost::from(-0.5),
            },
        );
    }

    #[test]
    fn non_finite_price() {
        let result = Instance::try_new(
            &series(&[f64::NAN]),
            &series(&[1.0]),
            &[1],
            DEFAULT_MAX_EVENTS,
        );
        assert!(matches!(result.unwrap_err(), ValidationError::InvalidPrice { slot: 0, .. }));
    }

    #[test]
    fn zero_duration() {
        let result = Instance::try_new(&series(&[1.0; 3]), &series(&[1.0; 3]), &[1, 0], 12);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvalidDuration { event: 1, duration: 0, horizon: 3 },
        );
    }

    #[test]
    fn too_long_duration() {
        let result = Instance::try_new(&series(&[1.0; 3]), &series(&[1.0; 3]), &[4], 12);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvalidDuration { event: 0, duration: 4, horizon: 3 },
        );
    }

    #[test]
    fn too_many_events() {
        let result = Instance::try_new(&series(&[1.0; 8]), &series(&[1.0; 8]), &[1, 1, 1], 2);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::TooManyEvents { n_events: 3, max_events: 2 },
        );
    }

    #[test]
    fn max_events_is_capped() {
        let durations = vec![1; MAX_EVENTS + 1];
        let prices = vec![1.0; MAX_EVENTS + 1];
        let result =
            Instance::try_new(&series(&prices), &series(&prices), &durations, usize::MAX);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::TooManyEvents { n_events: MAX_EVENTS + 1, max_events: MAX_EVENTS },
        );
    }

    #[test]
    fn insufficient_horizon() {
        let result = Instance::try_new(&series(&[1.0; 4]), &series(&[1.0; 4]), &[2, 3], 12);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InsufficientHorizon { total_duration: 5, horizon: 4 },
        );
    }

    #[test]
    fn too_many_states() {
        let prices = vec![1.0; 32];
        let result = Instance::try_new(&series(&prices), &series(&prices), &[1; 20], MAX_EVENTS);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::TooManyStates { n_states: 33 << 20, max_states: MAX_STATES },
        );
    }

    #[test]
    fn all_events_are_rejected_before_allocating() {
        let prices = vec![1.0; 40];
        let result =
            Instance::try_new(&series(&prices), &series(&prices), &[1; MAX_EVENTS], usize::MAX);
        assert!(matches!(result.unwrap_err(), ValidationError::TooManyStates { .. }));
    }

    #[test]
    fn default_event_limit_fits_a_long_horizon() {
        let prices = vec![1.0; 2048];
        let durations = [1; DEFAULT_MAX_EVENTS];
        assert!(
            Instance::try_new(&series(&prices), &series(&prices), &durations, DEFAULT_MAX_EVENTS)
                .is_ok()
        );
    }
}
