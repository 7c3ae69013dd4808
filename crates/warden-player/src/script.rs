//! Input scripts replayed by the headless player
//!
//! ```toml
//! spawn = [0.0, 1.0, 0.0]
//!
//! [[actuator]]
//! channel = "gate_3"
//! animation = "open"
//!
//! [[step]]
//! frames = 1
//! press = ["Mouse0"]
//!
//! [[step]]
//! frames = 60
//! hold = ["KeyW", "ShiftLeft"]
//! mouse = [40.0, 0.0]
//! signals = [{ channel = "gate_3", active = true }]
//! ```

use crate::map::MapBounds;
use serde::Deserialize;
use std::path::Path;
use warden_core::Result;
use warden_runtime::{parse_binding, ActuationPolicy, Binding};

/// An animated prop driven by a named channel
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActuatorEntry {
    pub channel: String,
    pub animation: String,
    #[serde(default)]
    pub policy: ActuationPolicy,
}

/// Signal published on a channel at the start of a step
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalEntry {
    pub channel: String,
    pub active: bool,
}

/// A run of frames with the same held input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub frames: u32,
    /// Held for every frame of the step
    pub hold: Vec<String>,
    /// Pressed on the first frame and released after it
    pub press: Vec<String>,
    /// Pointer motion delivered on the first frame
    pub mouse: Option<[f64; 2]>,
    pub signals: Vec<SignalEntry>,
}

impl Default for ScriptStep {
    fn default() -> Self {
        Self {
            frames: 1,
            hold: Vec::new(),
            press: Vec::new(),
            mouse: None,
            signals: Vec::new(),
        }
    }
}

impl ScriptStep {
    pub fn held_bindings(&self) -> Result<Vec<Binding>> {
        self.hold.iter().map(|name| parse_binding(name)).collect()
    }

    pub fn pressed_bindings(&self) -> Result<Vec<Binding>> {
        self.press.iter().map(|name| parse_binding(name)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Script {
    pub spawn: [f32; 3],
    pub map: MapBounds,
    #[serde(rename = "actuator")]
    pub actuators: Vec<ActuatorEntry>,
    #[serde(rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            spawn: [0.0, 1.0, 0.0],
            map: MapBounds::default(),
            actuators: Vec::new(),
            steps: Vec::new(),
        }
    }
}

impl Script {
    /// Parse a script, rejecting unknown key or button names up front
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let script: Self = toml::from_str(source)?;
        for step in &script.steps {
            step.held_bindings()?;
            step.pressed_bindings()?;
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Total frames the steps cover
    pub fn frame_count(&self) -> u64 {
        self.steps.iter().map(|s| s.frames as u64).sum()
    }
}
