//! Run configuration: refinement limits and the model/parameter/phase setup.
//!
//! A configuration directory holds a `config.json`:
//!
//! ```json
//! {
//!   "model": { "name": "leslie", "desc": "two-stage Leslie model" },
//!   "param": { "dim": 2, "subdiv_depth": 4,
//!              "bounds": { "lower": [8.0, 3.0], "upper": [37.0, 50.0] } },
//!   "phase": { "dim": 2,
//!              "bounds": { "lower": [0.0, 0.0], "upper": [320.056, 224.040] },
//!              "subdiv": { "min_depth": 12, "max_depth": 15, "complexity_limit": 10000 } }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::grid::{SpatialGrid, TreeGrid};
use crate::morse_error::MorseError;

/// File name looked up by [`Configuration::load_from_dir`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Budget for the refinement controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementLimits {
    /// Rounds of decomposition and bisection applied unconditionally.
    pub min_depth: u32,
    /// Deepest resolution used when probing candidates for spuriousness.
    pub max_depth: u32,
    /// Cell count above which a candidate is no longer subdivided.
    pub complexity_limit: usize,
    /// Attach an invariant to every Morse graph vertex.
    pub compute_invariants: bool,
}

impl Default for RefinementLimits {
    fn default() -> Self {
        Self {
            min_depth: 10,
            max_depth: 14,
            complexity_limit: 10_000,
            compute_invariants: false,
        }
    }
}

impl RefinementLimits {
    pub fn validate(&self) -> Result<(), MorseError> {
        if self.min_depth > self.max_depth {
            return Err(MorseError::InvalidConfig(format!(
                "min_depth {} exceeds max_depth {}",
                self.min_depth, self.max_depth
            )));
        }
        if self.complexity_limit == 0 {
            return Err(MorseError::InvalidConfig(
                "complexity_limit must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// Parameter space and the uniform depth it is cut into boxes at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpace {
    pub dim: usize,
    pub subdiv_depth: u32,
    pub bounds: Rect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpace {
    pub dim: usize,
    pub bounds: Rect,
    #[serde(default)]
    pub subdiv: RefinementLimits,
}

/// Complete description of one computation over a parameter space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub model: ModelInfo,
    pub param: ParameterSpace,
    pub phase: PhaseSpace,
}

impl Configuration {
    /// Read and validate a configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MorseError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| MorseError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Configuration =
            serde_json::from_str(&text).map_err(|e| MorseError::ConfigParse(e.to_string()))?;
        config.validate()?;
        log::debug!(
            "loaded configuration `{}` from {}",
            config.model.name,
            path.display()
        );
        Ok(config)
    }

    /// Read `config.json` from a directory.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, MorseError> {
        Self::load_from_file(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), MorseError> {
        check_bounds(&self.param.bounds, self.param.dim)?;
        check_bounds(&self.phase.bounds, self.phase.dim)?;
        self.phase.subdiv.validate()
    }

    /// Refinement limits for the phase space.
    pub fn limits(&self) -> &RefinementLimits {
        &self.phase.subdiv
    }

    /// Parameter boxes of the uniform subdivision, in leaf order.
    pub fn parameter_boxes(&self) -> Vec<Rect> {
        let grid = TreeGrid::uniform(self.param.bounds.clone(), self.param.subdiv_depth);
        grid.leaves().into_iter().map(|c| grid.geometry(c)).collect()
    }

    /// Unrefined phase-space grid.
    pub fn phase_grid(&self) -> TreeGrid {
        TreeGrid::new(self.phase.bounds.clone())
    }
}

fn check_bounds(bounds: &Rect, dim: usize) -> Result<(), MorseError> {
    let found = bounds.dimension();
    if found != dim || bounds.upper.len() != dim {
        return Err(MorseError::DimensionMismatch { expected: dim, found });
    }
    if bounds.lower.iter().zip(&bounds.upper).any(|(l, u)| l > u) {
        return Err(MorseError::InvalidConfig(format!(
            "inverted bounds {:?} .. {:?}",
            bounds.lower, bounds.upper
        )));
    }
    Ok(())
}
