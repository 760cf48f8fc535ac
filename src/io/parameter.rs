//! Per-parameter-box records produced by a sweep.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::MorseGraphRecord;
use crate::geometry::Rect;
use crate::morse_error::MorseError;
use crate::sweep::BoxOutcome;

/// What a storage layer keeps for one parameter box: the box and either its
/// Morse graph or the reason the run failed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterBoxRecord<I> {
    pub index: usize,
    pub parameters: Rect,
    pub graph: Option<MorseGraphRecord<I>>,
    pub error: Option<String>,
}

impl<I: Clone> From<&BoxOutcome<I>> for ParameterBoxRecord<I> {
    fn from(outcome: &BoxOutcome<I>) -> Self {
        let (graph, error) = match &outcome.result {
            Ok(r) => (Some(MorseGraphRecord::from(&r.graph)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            index: outcome.index,
            parameters: outcome.parameters.clone(),
            graph,
            error,
        }
    }
}

/// Write all records of a sweep as one JSON array.
pub fn write_records<I>(path: impl AsRef<Path>, records: &[ParameterBoxRecord<I>]) -> Result<(), MorseError>
where
    I: Serialize,
{
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(records)?;
    fs::write(path, text)
        .map_err(|e| MorseError::Serialization(format!("{}: {e}", path.display())))
}

pub fn read_records<I>(path: impl AsRef<Path>) -> Result<Vec<ParameterBoxRecord<I>>, MorseError>
where
    I: DeserializeOwned,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| MorseError::Serialization(format!("{}: {e}", path.display())))?;
    Ok(serde_json::from_str(&text)?)
}
