//! Domain-specific newtypes for type safety.
//!
//! Money flows through the history, the reports and the display layer.
//! Wrapping it keeps amounts from being mixed up with service counts, and
//! `derive_more` removes the arithmetic boilerplate.

use std::fmt;
use std::ops::{AddAssign, Div};

use derive_more::{Add as DeriveAdd, From, Into, Sum};
use serde::{Deserialize, Serialize};

/// A monetary amount in whole pesos.
///
/// The data API sends plain JSON numbers; fractional values are rounded to
/// the nearest peso on the way in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    DeriveAdd,
    Sum,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(from = "f64", into = "i64")]
pub struct Amount(pub i64);

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert to a floating point value for averages and ratios.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl From<f64> for Amount {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: f64) -> Self {
        Self(value.round() as i64)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Average amount per unit, e.g. revenue per day or per service.
///
/// Dividing by zero yields 0.0 rather than NaN.
impl Div<usize> for Amount {
    type Output = f64;

    #[allow(clippy::cast_precision_loss)]
    fn div(self, rhs: usize) -> Self::Output {
        if rhs == 0 {
            0.0
        } else {
            self.0 as f64 / rhs as f64
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
