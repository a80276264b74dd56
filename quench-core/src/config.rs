//! Flat run configuration.
//!
//! One struct carries every knob of a run; the engine parses the schedule
//! and remap strings at construction and echoes the raw values into the
//! result map.

use crate::error::Result;
use crate::graph::remap::RemapPolicy;

/// All parameters of one annealing run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Master seed for the splittable seed sequence.
    pub seed: u64,
    /// Number of annealing steps.
    pub steps: u64,
    /// Number of Trotter slices.
    pub nt: usize,
    /// Temperature schedule string, e.g. `"[0.01,0.01]"`.
    pub t_schedule: String,
    /// Transverse-field schedule string, e.g. `"[10,iF,0.01]"`.
    pub h_schedule: String,
    /// Remap policy string, e.g. `"sorted,fill,0"`.
    pub remap: String,
    /// Periodic world-lines along imaginary time.
    pub periodic: bool,
    /// Report relative to the first spin's orientation instead of spin up.
    pub first_in: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            steps: 1000,
            nt: 100,
            t_schedule: "[0.01,0.01]".to_string(),
            h_schedule: "[10,iF,0.01]".to_string(),
            remap: "sorted,fill,0".to_string(),
            periodic: true,
            first_in: false,
        }
    }
}

impl RunConfig {
    /// Parses the remap policy string.
    ///
    /// # Errors
    /// [`crate::Error::RemapMalformed`] if the string is not of the form
    /// `{sorted|encounter},{fill,<start>|no_fill}`.
    pub fn remap_policy(&self) -> Result<RemapPolicy> {
        self.remap.parse()
    }
}
