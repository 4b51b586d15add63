//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::mining::DensityThreshold;
use crate::Result;

/// Density threshold handed to the miner when none is configured.
pub const DEFAULT_DENSITY_THRESHOLD: f64 = 0.8;

/// How the selection engine treats events naming a vertex or bicluster that
/// is not part of the current view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Reject with [`crate::Error::InvalidReference`].
    #[default]
    Strict,
    /// Ignore the event and log a warning.
    Lenient,
}

/// Configuration for [`crate::Session::open`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum block density passed to the miner, in `(0, 1]`.
    pub density_threshold: f64,
    pub reference_policy: ReferencePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            reference_policy: ReferencePolicy::Strict,
        }
    }
}

impl SessionConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_density_threshold(mut self, threshold: f64) -> Self {
        self.density_threshold = threshold;
        self
    }

    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }

    /// Validated density threshold.
    pub fn threshold(&self) -> Result<DensityThreshold> {
        DensityThreshold::new(self.density_threshold)
    }
}
