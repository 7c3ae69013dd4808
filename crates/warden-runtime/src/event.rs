//! Events carried by the event bus

/// Channel the character controller announces movement on
pub const POSITION_CHANGED: &str = "position_changed";

/// An event published on a named channel
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The player moved; carries the new planar coordinates
    PositionChanged { x: f32, z: f32 },
    /// Activate/deactivate signal on a named channel (`gate_3`, `vent_1`, `init`, ...)
    Signal { channel: String, active: bool },
}

impl GameEvent {
    pub fn signal(channel: impl Into<String>, active: bool) -> Self {
        GameEvent::Signal {
            channel: channel.into(),
            active,
        }
    }

    /// Name of the channel this event is delivered on
    pub fn channel(&self) -> &str {
        match self {
            GameEvent::PositionChanged { .. } => POSITION_CHANGED,
            GameEvent::Signal { channel, .. } => channel,
        }
    }
}
