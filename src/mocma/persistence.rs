use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Mocma, MocmaConfig};
use crate::error::{Error, Result};
use crate::indicator::Indicator;
use crate::individual::Individual;
use crate::rng_util;

/// A serializable snapshot of an optimizer's state.
///
/// The indicator is **not** part of the snapshot; it is supplied again on
/// [`Mocma::restore`] / [`Mocma::load`].
///
/// # Schema versioning
///
/// The `version` field enables future schema evolution without breaking
/// existing files. The current version is `1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MocmaSnapshot {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The configuration.
    pub config: MocmaConfig,
    /// The full `2 * mu` arena, parents first; empty before `init`.
    pub population: Vec<Individual>,
    /// Completed generations.
    pub generation: u64,
    /// Objective evaluations so far.
    pub evaluations: u64,
    /// State of the master random generator.
    pub rng_state: u64,
    /// State of the indicator's random generator, for randomized indicators.
    #[serde(default)]
    pub indicator_rng_state: Option<u64>,
}

impl<I: Indicator> Mocma<I> {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> MocmaSnapshot {
        MocmaSnapshot {
            version: 1,
            config: self.config.clone(),
            population: self.population.clone(),
            generation: self.generation,
            evaluations: self.evaluator.evaluations(),
            rng_state: self.rng.get_seed(),
            indicator_rng_state: self.selection.indicator().rng_state(),
        }
    }

    /// Rebuild an optimizer from a snapshot. Stepping the result continues
    /// the captured run exactly, provided `indicator` is configured like the
    /// captured one; a randomized indicator is resumed from the captured
    /// generator state.
    ///
    /// # Errors
    ///
    /// Returns the configuration errors of [`MocmaConfig::validate`] and
    /// [`Error::InvalidMu`] if the population is neither empty nor `2 * mu`.
    pub fn restore(snapshot: MocmaSnapshot, indicator: I) -> Result<Self> {
        let mu = snapshot.config.mu;
        let mut mocma = Self::new(snapshot.config, indicator)?;
        if !snapshot.population.is_empty() && snapshot.population.len() != 2 * mu {
            return Err(Error::InvalidMu {
                mu,
                population: snapshot.population.len(),
            });
        }
        mocma.population = snapshot.population;
        mocma.generation = snapshot.generation;
        mocma.evaluator.set_evaluations(snapshot.evaluations);
        mocma.rng = rng_util::make_rng(Some(snapshot.rng_state));
        if let Some(state) = snapshot.indicator_rng_state {
            mocma.selection.indicator().set_rng_state(state);
        }
        Ok(mocma)
    }

    /// Save the optimizer state to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let snapshot = self.snapshot();

        // Write next to the target, then rename over it.
        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        let file = std::fs::File::create(&tmp_path)?;
        serde_json::to_writer_pretty(file, &snapshot).map_err(std::io::Error::other)?;
        std::fs::rename(&tmp_path, path)
    }

    /// Load an optimizer from a JSON file written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, parsed, or holds an
    /// invalid configuration.
    pub fn load(path: impl AsRef<Path>, indicator: I) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let snapshot: MocmaSnapshot = serde_json::from_reader(file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Self::restore(snapshot, indicator)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
