//! Set-valued maps on phase space.
//!
//! A [`PhaseMap`] sends a box to a box enclosing its image. The rigorous
//! integrators that produce such enclosures live outside this crate; the
//! helpers here cover closed-form models evaluated with [`Interval`] bounds.

pub mod interval;
pub mod leslie;

pub use interval::Interval;
pub use leslie::LeslieMap;

use crate::geometry::Rect;

/// Outer approximation of a map `f: R^n -> R^n` on boxes.
///
/// Implementations must be stateless per call: the same box always yields the
/// same enclosure.
pub trait PhaseMap {
    /// A box containing `f(region)`.
    fn image(&self, region: &Rect) -> Rect;
}

impl<M: PhaseMap + ?Sized> PhaseMap for &M {
    fn image(&self, region: &Rect) -> Rect {
        (**self).image(region)
    }
}

/// Adapts a closure into a [`PhaseMap`].
pub struct FnMap<F>(pub F);

impl<F> PhaseMap for FnMap<F>
where
    F: Fn(&Rect) -> Rect,
{
    fn image(&self, region: &Rect) -> Rect {
        (self.0)(region)
    }
}

/// Interval extension of a coordinate-wise map given as a function on intervals.
pub fn interval_image<F>(region: &Rect, f: F) -> Rect
where
    F: Fn(&[Interval]) -> Vec<Interval>,
{
    let input: Vec<Interval> = region
        .lower
        .iter()
        .zip(&region.upper)
        .map(|(&l, &u)| Interval::new(l, u))
        .collect();
    let output = f(&input);
    Rect {
        lower: output.iter().map(|i| i.lower()).collect(),
        upper: output.iter().map(|i| i.upper()).collect(),
    }
}
