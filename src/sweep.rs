//! Parameter sweep: one independent refinement run per parameter box.
//!
//! Every box gets its own grid and its own map instance; nothing is shared
//! between runs. With the `rayon` feature the boxes are processed on the rayon
//! thread pool, otherwise one after another. Results come back in box order
//! either way.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::config::{Configuration, RefinementLimits};
use crate::conley::InvariantComputer;
use crate::geometry::Rect;
use crate::grid::TreeGrid;
use crate::maps::PhaseMap;
use crate::morse_error::MorseError;
use crate::refine::{Refinement, refine};

/// Result of the run for one parameter box.
#[derive(Debug)]
pub struct BoxOutcome<I> {
    pub index: usize,
    pub parameters: Rect,
    pub result: Result<Refinement<I>, MorseError>,
}

/// Boxes of a parameter space together with the phase space setup.
pub struct ParameterSweep<F> {
    boxes: Vec<Rect>,
    phase_bounds: Rect,
    limits: RefinementLimits,
    make_map: F,
}

impl<F, M> ParameterSweep<F>
where
    F: Fn(&Rect) -> Result<M, MorseError> + Sync,
    M: PhaseMap,
{
    /// `make_map` builds the phase-space map for one parameter box.
    pub fn new(boxes: Vec<Rect>, phase_bounds: Rect, limits: RefinementLimits, make_map: F) -> Self {
        Self {
            boxes,
            phase_bounds,
            limits,
            make_map,
        }
    }

    /// Sweep over the uniform parameter subdivision of `config`.
    pub fn from_config(config: &Configuration, make_map: F) -> Self {
        Self::new(
            config.parameter_boxes(),
            config.phase.bounds.clone(),
            config.limits().clone(),
            make_map,
        )
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[Rect] {
        &self.boxes
    }

    /// Run the pipeline for the box at `index`.
    pub fn run_box<C>(&self, index: usize, conley: &C) -> BoxOutcome<C::Invariant>
    where
        C: InvariantComputer,
    {
        let parameters = self.boxes[index].clone();
        let result = (self.make_map)(&parameters).and_then(|map| {
            let mut grid = TreeGrid::new(self.phase_bounds.clone());
            refine(&mut grid, &map, &self.limits, conley)
        });
        match &result {
            Ok(r) => log::debug!(
                "parameter box {index}: {} Morse sets",
                r.graph.num_vertices()
            ),
            Err(e) => log::warn!("parameter box {index} failed: {e}"),
        }
        BoxOutcome {
            index,
            parameters,
            result,
        }
    }

    /// Run every box.
    #[cfg(feature = "rayon")]
    pub fn run<C>(&self, conley: &C) -> Vec<BoxOutcome<C::Invariant>>
    where
        C: InvariantComputer + Sync,
        C::Invariant: Send,
    {
        (0..self.boxes.len())
            .into_par_iter()
            .map(|i| self.run_box(i, conley))
            .collect()
    }

    /// Run every box.
    #[cfg(not(feature = "rayon"))]
    pub fn run<C>(&self, conley: &C) -> Vec<BoxOutcome<C::Invariant>>
    where
        C: InvariantComputer + Sync,
        C::Invariant: Send,
    {
        (0..self.boxes.len()).map(|i| self.run_box(i, conley)).collect()
    }
}
