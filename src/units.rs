use std::{cmp::Ordering, ops::Add};

/// A data rate, in whatever unit the link capacities are given in.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    derive_more::Add,
    derive_more::Sub,
    derive_more::AddAssign,
    derive_more::SubAssign,
    derive_more::Sum,
    derive_more::Display,
    derive_more::FromStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Rate(f64);

impl Rate {
    pub const ZERO: Rate = Self::new(0.0);
    pub const INFINITY: Rate = Self::new(f64::INFINITY);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn into_f64(self) -> f64 {
        self.0
    }

    pub fn min(self, rhs: Self) -> Self {
        Self(self.0.min(rhs.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn checked_div(self, rhs: usize) -> Option<Self> {
        if rhs == 0 {
            None
        } else {
            Some(Self(self.0 / rhs as f64))
        }
    }
}

/// A tentative path cost in the route search.
///
/// Costs are totally ordered so they can key a binary heap. NaN never arises because edge weights
/// are built from finite, non-negative rates.
#[derive(Debug, Default, Copy, Clone, derive_more::Display)]
pub struct Cost(f64);

impl Cost {
    pub const ZERO: Cost = Self::new(0.0);
    pub const MAX: Cost = Self::new(f64::INFINITY);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn into_f64(self) -> f64 {
        self.0
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
