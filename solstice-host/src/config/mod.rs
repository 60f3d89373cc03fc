//! Configuration
//!
//! The face settings come from `solstice_core::config`. The simulator adds
//! its own `[simulation]` section to the same file.

mod loader;

pub use loader::{config_path, load_config};

use serde::Deserialize;
use solstice_core::config::FaceConfig;

/// Complete simulator configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub face: FaceConfig,
    pub simulation: SimulationConfig,
}

/// Simulator settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Show the face at startup
    pub start_visible: bool,
    /// Reported low-bit ambient property
    pub low_bit_ambient: bool,
    /// Local node identity on the loopback data layer
    pub node_id: String,
    /// Seconds between companion forecast updates
    pub publish_interval_s: u64,
    /// Seconds between host time ticks while ambient
    pub time_tick_s: u64,
    /// Forecasts the companion cycles through
    pub forecasts: Vec<Forecast>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            canvas_width: 320,
            canvas_height: 320,
            start_visible: true,
            low_bit_ambient: false,
            node_id: "solstice-watch".into(),
            publish_interval_s: 30,
            time_tick_s: 60,
            forecasts: Vec::new(),
        }
    }
}

/// One forecast published by the simulated companion
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Forecast {
    pub condition_id: i32,
    pub high: String,
    pub low: String,
    #[serde(default)]
    pub short_desc: String,
    #[serde(default)]
    pub units: String,
}
