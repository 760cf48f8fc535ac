//! Two-dimensional Leslie population model.
//!
//! `x' = (θ1 x + θ2 y) exp(-0.1 (x + y))`, `y' = 0.7 x`, with the parameters
//! given as a box so one map instance covers a whole parameter patch.

use super::{interval_image, Interval, PhaseMap};
use crate::geometry::Rect;
use crate::morse_error::MorseError;

/// Leslie map over a parameter box `[θ1] x [θ2]`.
#[derive(Clone, Copy, Debug)]
pub struct LeslieMap {
    theta1: Interval,
    theta2: Interval,
}

impl LeslieMap {
    /// Build from a 2-dimensional parameter box.
    pub fn new(parameters: &Rect) -> Result<Self, MorseError> {
        if parameters.dimension() != 2 {
            return Err(MorseError::DimensionMismatch {
                expected: 2,
                found: parameters.dimension(),
            });
        }
        Ok(Self {
            theta1: Interval::new(parameters.lower[0], parameters.upper[0]),
            theta2: Interval::new(parameters.lower[1], parameters.upper[1]),
        })
    }
}

impl PhaseMap for LeslieMap {
    fn image(&self, region: &Rect) -> Rect {
        interval_image(region, |v| {
            let (x, y) = (v[0], v[1]);
            let growth = (self.theta1 * x + self.theta2 * y) * ((-0.1) * (x + y)).exp();
            vec![growth, 0.7 * x]
        })
    }
}
