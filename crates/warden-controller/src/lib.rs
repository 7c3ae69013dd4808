//! Warden Controller - first-person character controller
//!
//! Turns device input into look, locomotion, jumping, sprinting and freefly:
//! - `ControllerConfig` — capability flags, speeds and action bindings (TOML)
//! - `validate_bindings` — startup check that downgrades capabilities with missing bindings
//! - `Orientation` — yaw/pitch look state with pitch clamping
//! - `MovementState` — Grounded/Freefly state machine run on each physics tick
//! - `PositionNotifier` — announces movement on the event bus
//! - `PlayerController` — ties the above together and implements `RuntimeSystem`

pub mod capabilities;
pub mod config;
pub mod controller;
pub mod look;
pub mod movement;
pub mod notifier;

#[cfg(test)]
mod testing;

pub use capabilities::{validate_bindings, Capability, MissingBinding, ValidationReport};
pub use config::{CapabilityFlags, ControllerConfig, InputBindings, MovementConfig};
pub use controller::PlayerController;
pub use look::{Orientation, PITCH_LIMIT_DEGREES};
pub use movement::{ControllerMode, EdgeLatch, MovementState, TickInput, TickOutcome};
pub use notifier::PositionNotifier;
