use crate::{
    core::{instance::Instance, window::Window},
    cost::Cost,
    error::Error,
};

/// Answers «how much does it cost to occupy slots `start..start + len`?» in constant time.
///
/// Built once per instance from the prefix sums of both price series.
#[must_use]
pub struct CostModel {
    /// `prefix_electricity[k]` is the sum of the electricity prices over `0..k`.
    prefix_electricity: Vec<Cost>,

    /// `prefix_labor[k]` is the sum of the labor prices over `0..k`.
    prefix_labor: Vec<Cost>,
}

impl CostModel {
    pub fn new(instance: &Instance) -> Self {
        Self {
            prefix_electricity: Self::prefix_sums(instance.electricity()),
            prefix_labor: Self::prefix_sums(instance.labor()),
        }
    }

    fn prefix_sums(prices: &[Cost]) -> Vec<Cost> {
        let mut sums = Vec::with_capacity(prices.len() + 1);
        let mut sum = Cost::ZERO;
        sums.push(sum);
        for price in prices {
            sum += *price;
            sums.push(sum);
        }
        sums
    }

    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.prefix_electricity.len() - 1
    }

    /// Total cost of occupying the window.
    pub fn window_cost(&self, start: usize, len: usize) -> Result<Cost, Error> {
        self.window_breakdown(start, len).map(CostBreakdown::total)
    }

    /// Cost of occupying the window, split into electricity and labor.
    pub fn window_breakdown(&self, start: usize, len: usize) -> Result<CostBreakdown, Error> {
        let window = self.check(start, len)?;
        Ok(CostBreakdown {
            electricity: self.prefix_electricity[window.end] - self.prefix_electricity[window.start],
            labor: self.prefix_labor[window.end] - self.prefix_labor[window.start],
        })
    }

    fn check(&self, start: usize, len: usize) -> Result<Window, Error> {
        let horizon = self.horizon();
        match start.checked_add(len) {
            Some(end) if end <= horizon => Ok(Window { start, end }),
            _ => Err(Error::OutOfRange { start, end: start.saturating_add(len), horizon }),
        }
    }
}

#[must_use]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CostBreakdown {
    pub electricity: Cost,
    pub labor: Cost,
}

impl CostBreakdown {
    pub fn total(self) -> Cost {
        self.electricity + self.labor
    }
}

impl std::ops::Add for CostBreakdown {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { electricity: self.electricity + rhs.electricity, labor: self.labor + rhs.labor }
    }
}

impl std::iter::Sum for CostBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |sum, item| sum + item)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::instance::tests::instance;

    #[test]
    fn window_cost_ok() {
        let model = CostModel::new(&instance(&[5.0, 1.0, 1.0, 5.0], &[0.5, 0.5, 0.0, 1.0], &[]));
        assert_eq!(model.horizon(), 4);
        assert_abs_diff_eq!(model.window_cost(1, 2).unwrap().into_inner(), 2.5);
        assert_abs_diff_eq!(model.window_cost(0, 4).unwrap().into_inner(), 14.0);
        assert_eq!(model.window_cost(2, 0).unwrap(), Cost::ZERO);
    }

    #[test]
    fn window_breakdown_ok() {
        let model = CostModel::new(&instance(&[5.0, 1.0, 1.0, 5.0], &[0.5, 0.5, 0.0, 1.0], &[]));
        let breakdown = model.window_breakdown(2, 2).unwrap();
        assert_abs_diff_eq!(breakdown.electricity.into_inner(), 6.0);
        assert_abs_diff_eq!(breakdown.labor.into_inner(), 1.0);
    }

    #[test]
    fn window_cost_matches_slot_sums() {
        let electricity = [0.06, 0.05, 0.04, 0.04, 0.05, 0.06, 0.08, 0.12];
        let labor = [0.4, 0.4, 0.4, 0.4, 0.4, 0.3, 0.3, 0.3];
        let model = CostModel::new(&instance(&electricity, &labor, &[]));
        for start in 0..electricity.len() {
            for len in 0..=(electricity.len() - start) {
                let expected: f64 = (start..start + len).map(|slot| electricity[slot] + labor[slot]).sum();
                assert_abs_diff_eq!(
                    model.window_cost(start, len).unwrap().into_inner(),
                    expected,
                    epsilon = 1e-9,
                );
            }
        }
    }

    #[test]
    fn out_of_range() {
        let model = CostModel::new(&instance(&[1.0, 1.0], &[1.0, 1.0], &[]));
        assert!(matches!(
            model.window_cost(1, 2),
            Err(Error::OutOfRange { start: 1, end: 3, horizon: 2 }),
        ));
        assert!(matches!(model.window_cost(usize::MAX, 2), Err(Error::OutOfRange { .. })));
    }
}
