//! Minimal interval arithmetic for box images of closed-form maps.
//!
//! Rounding is not directed, so enclosures are tight but not rigorous.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Closed interval `[lower, upper]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Interval with the given endpoints (swapped if given in reverse).
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// Degenerate interval `[x, x]`.
    pub fn point(x: f64) -> Self {
        Self { lower: x, upper: x }
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// `exp` is monotone, so endpoints map to endpoints.
    pub fn exp(self) -> Self {
        Self {
            lower: self.lower.exp(),
            upper: self.upper.exp(),
        }
    }

    /// Exact power enclosure (handles the sign change for even exponents).
    pub fn powi(self, n: i32) -> Self {
        let a = self.lower.powi(n);
        let b = self.upper.powi(n);
        if n % 2 == 0 && self.contains(0.0) {
            Self {
                lower: 0.0,
                upper: a.max(b),
            }
        } else {
            Self::new(a, b)
        }
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(k * self.lower, k * self.upper)
    }
}

impl Add for Interval {
    type Output = Interval;
    fn add(self, rhs: Interval) -> Interval {
        Interval {
            lower: self.lower + rhs.lower,
            upper: self.upper + rhs.upper,
        }
    }
}

impl Add<f64> for Interval {
    type Output = Interval;
    fn add(self, rhs: f64) -> Interval {
        self + Interval::point(rhs)
    }
}

impl Sub for Interval {
    type Output = Interval;
    fn sub(self, rhs: Interval) -> Interval {
        Interval {
            lower: self.lower - rhs.upper,
            upper: self.upper - rhs.lower,
        }
    }
}

impl Neg for Interval {
    type Output = Interval;
    fn neg(self) -> Interval {
        Interval {
            lower: -self.upper,
            upper: -self.lower,
        }
    }
}

impl Mul for Interval {
    type Output = Interval;
    fn mul(self, rhs: Interval) -> Interval {
        let a = self.lower * rhs.lower;
        let b = self.lower * rhs.upper;
        let c = self.upper * rhs.lower;
        let d = self.upper * rhs.upper;
        Interval {
            lower: a.min(b).min(c.min(d)),
            upper: a.max(b).max(c.max(d)),
        }
    }
}

impl Mul<Interval> for f64 {
    type Output = Interval;
    fn mul(self, rhs: Interval) -> Interval {
        rhs.scale(self)
    }
}
