use std::{cmp, fmt, iter, ops};

use serde::{Deserialize, Serialize};

/// Meters along the ground. Edge costs, search priorities and snapping thresholds are all
/// expressed in this.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Distance(f64);

// Never NaN or infinite, so the ordering is total.
impl Eq for Distance {}

#[allow(clippy::derive_ord_xor_partial_ord)]
impl Ord for Distance {
    fn cmp(&self, other: &Distance) -> cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    /// Panics on NaN or infinity. Coordinates are checked before any distance is calculated from
    /// them, so hitting this is a bug.
    pub fn meters(value: f64) -> Distance {
        if !value.is_finite() {
            panic!("Distance of {} meters", value);
        }
        Distance(value)
    }

    pub fn inner_meters(self) -> f64 {
        self.0
    }

    /// self / other, or 0 when other is zero.
    pub fn safe_percent(self, other: Distance) -> f64 {
        if other == Distance::ZERO {
            0.0
        } else {
            self.0 / other.0
        }
    }

    pub fn approx_eq(self, other: Distance, epsilon_meters: f64) -> bool {
        (self.0 - other.0).abs() <= epsilon_meters
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}m", self.0)
    }
}

impl ops::Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        Distance::meters(self.0 + other.0)
    }
}

impl ops::AddAssign for Distance {
    fn add_assign(&mut self, other: Distance) {
        *self = *self + other;
    }
}

impl iter::Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Distance {
        iter.fold(Distance::ZERO, |total, x| total + x)
    }
}
