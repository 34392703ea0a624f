//! Timer configuration, loadable from TOML. Every key is optional.
//!
//! ```toml
//! scramble_settle_ms = 2000
//! inspection_ms = 3000
//! cross_face = "D"
//! ```

use crate::cube333::Side;
use crate::error::ConfigError;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Durations, limits and solve settings used by the [`SolveTimer`](super::SolveTimer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// How long the cube must sit still after scrambling before inspection starts.
    pub scramble_settle_ms: u64,
    /// Length of the inspection countdown.
    pub inspection_ms: u64,
    /// Refresh interval for live displays while inspecting or solving.
    pub tick_ms: u64,
    /// Quiet period after a solving move before a fresh snapshot is requested.
    pub facelets_debounce_ms: u64,
    /// Most solves kept in history.
    pub history_capacity: usize,
    /// Cross colour, as a face of the physical cube.
    pub cross_face: Side,
    /// Method name stored with each solve.
    pub method: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            scramble_settle_ms: 2000,
            inspection_ms: 3000,
            tick_ms: 10,
            facelets_debounce_ms: 500,
            history_capacity: 1000,
            cross_face: Side::D,
            method: "CFOP".to_string(),
        }
    }
}

impl TimerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
