//! Closed axis-aligned boxes in `R^n`, the region type shared by grids and maps.

use crate::morse_error::MorseError;
use serde::{Deserialize, Serialize};

/// A closed box `[lower_0, upper_0] x ... x [lower_{n-1}, upper_{n-1}]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Rect {
    /// Build a box from its corner vectors.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, MorseError> {
        if lower.len() != upper.len() {
            return Err(MorseError::DimensionMismatch {
                expected: lower.len(),
                found: upper.len(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Degenerate box containing a single point.
    pub fn point(p: &[f64]) -> Self {
        Self {
            lower: p.to_vec(),
            upper: p.to_vec(),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Width along `axis`.
    #[inline]
    pub fn width(&self, axis: usize) -> f64 {
        self.upper[axis] - self.lower[axis]
    }

    /// Center point.
    pub fn center(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(l, u)| 0.5 * (l + u))
            .collect()
    }

    /// Closed intersection test: boxes that only touch on a face intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.lower
            .iter()
            .zip(&self.upper)
            .zip(other.lower.iter().zip(&other.upper))
            .all(|((l, u), (ol, ou))| !(l > ou || u < ol))
    }

    /// True if `p` lies in the closed box.
    pub fn contains_point(&self, p: &[f64]) -> bool {
        self.lower
            .iter()
            .zip(&self.upper)
            .zip(p)
            .all(|((l, u), x)| l <= x && x <= u)
    }

    /// Smallest box containing both `self` and `other`.
    pub fn hull(&self, other: &Rect) -> Rect {
        Rect {
            lower: self
                .lower
                .iter()
                .zip(&other.lower)
                .map(|(a, b)| a.min(*b))
                .collect(),
            upper: self
                .upper
                .iter()
                .zip(&other.upper)
                .map(|(a, b)| a.max(*b))
                .collect(),
        }
    }

    /// Split in half along `axis`, returning `(lower half, upper half)`.
    pub fn bisect(&self, axis: usize) -> (Rect, Rect) {
        let mid = 0.5 * (self.lower[axis] + self.upper[axis]);
        let mut lo = self.clone();
        let mut hi = self.clone();
        lo.upper[axis] = mid;
        hi.lower[axis] = mid;
        (lo, hi)
    }
}
