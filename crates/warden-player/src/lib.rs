//! Warden Player — headless player library
//!
//! Replays scripted input through the first-person controller on a Rapier
//! ground slab, with channel actuators and a map tracker listening on the
//! event bus.

pub mod map;
pub mod script;
mod simulation;

pub use map::{MapBounds, MapTracker};
pub use script::{ActuatorEntry, Script, ScriptStep, SignalEntry};
pub use simulation::{load_config, ActuatorSummary, AnimationLog, Simulation, SimulationReport};
