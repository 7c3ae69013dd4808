//! Runtime system trait

use crate::input::InputState;
use warden_core::Result;

/// A system that can be ticked by the frame loop
///
/// Each frame runs `update` once (variable rate, input phase) followed by zero
/// or more `fixed_update` calls (fixed rate, physics phase). Calls are never
/// concurrent and never re-entrant.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self, input: &InputState) -> Result<()>;

    /// Called once per frame for variable-rate logic
    fn update(&mut self, input: &mut InputState, dt: f64) -> Result<()>;

    /// Called at a fixed rate (e.g. 60Hz) for deterministic simulation
    fn fixed_update(&mut self, input: &InputState, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
