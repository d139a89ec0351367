//! Runtime settings
//!
//! The library takes settings by value. Reading them from disk is the
//! binary's business.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::FPS;

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Pacing ===
    /// Frames per second the loop paces itself to
    pub target_fps: u32,
    /// Sleep between clock polls while waiting out a frame, and per idle
    /// paused frame (microseconds)
    pub pacing_sleep_us: u64,

    // === Simulation ===
    /// RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Never load or play sounds
    pub muted: bool,

    // === Assets ===
    /// Prepended to every sprite stem before it reaches the loader
    pub asset_stem_prefix: String,

    // === Demo ===
    /// Frames the headless demo session runs before quitting
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: FPS,
            pacing_sleep_us: 100,
            seed: None,
            muted: false,
            asset_stem_prefix: String::new(),
            demo_frames: 3600,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Wall time budgeted for one frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }

    /// Short sleep used while pacing
    pub fn pacing_sleep(&self) -> Duration {
        Duration::from_micros(self.pacing_sleep_us)
    }
}
