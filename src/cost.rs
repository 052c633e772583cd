use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Monetary amount: a per-slot price, or a sum of those over a window.
///
/// Backed by [`OrderedFloat`] so that costs are totally ordered and can be used as
/// [`Iterator::min_by_key`] keys in the solver.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[from(i32, f64, OrderedFloat<f64>)]
#[serde(transparent)]
#[must_use]
pub struct Cost(pub OrderedFloat<f64>);

impl Cost {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    pub const fn into_inner(self) -> f64 {
        self.0.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn is_sign_negative(self) -> bool {
        self.0.is_sign_negative() && self.0.0 != 0.0
    }
}

impl Mul<f64> for Cost {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_ok() {
        let total: Cost = [Cost::from(1), Cost::from(2.5), Cost::ZERO].into_iter().sum();
        assert_eq!(total, Cost::from(3.5));
    }

    #[test]
    fn ordering_ok() {
        assert!(Cost::from(0.1) < Cost::from(0.2));
        assert_eq!([Cost::from(3), Cost::from(1)].into_iter().min(), Some(Cost::from(1)));
    }

    #[test]
    fn negative_zero_is_not_negative() {
        assert!(!Cost::from(-0.0).is_sign_negative());
        assert!(Cost::from(-0.01).is_sign_negative());
    }

    #[test]
    fn serde_transparent_ok() {
        assert_eq!(serde_json::to_string(&Cost::from(0.25)).unwrap(), "0.25");
        assert_eq!(serde_json::from_str::<Cost>("1.5").unwrap(), Cost::from(1.5));
    }
}
