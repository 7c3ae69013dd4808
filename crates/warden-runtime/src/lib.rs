//! Warden Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a host drives each frame:
//! - `GameClock` / `FrameLoop` — fixed-timestep accumulator and the update → physics order
//! - `InputState` — keyboard and mouse input tracking with action bindings
//! - `GameEvent` / `EventBus` — channel-keyed publish/subscribe between entities
//! - `ChannelActuator` — plays or reverses an animation when its channel is signalled
//! - `Diagnostics` — best-effort structured logging and spans
//! - `RuntimeSystem` — trait for systems ticked by the frame loop

mod actuator;
mod clock;
mod diagnostics;
mod event;
mod event_bus;
mod frame_loop;
mod input;
mod system;

pub use actuator::{ActuationPolicy, AnimationTarget, ChannelActuator};
pub use clock::GameClock;
pub use diagnostics::{init_logging, Diagnostics, SpanHandle};
pub use event::{GameEvent, POSITION_CHANGED};
pub use event_bus::{EventBus, Subscription};
pub use frame_loop::{FrameLoop, FrameStats};
pub use input::{parse_binding, ActionRegistry, Binding, CursorMode, InputConfig, InputState};
pub use system::RuntimeSystem;
