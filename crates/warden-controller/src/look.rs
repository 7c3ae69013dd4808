//! Look orientation driven by pointer motion

use warden_core::{deg_to_rad, Vec3};

/// Maximum look angle above or below the horizon
pub const PITCH_LIMIT_DEGREES: f32 = 85.0;

/// Yaw and pitch of the player's view, in radians.
///
/// Pitch is always inside ±[`PITCH_LIMIT_DEGREES`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Turn the view by a pointer delta. Moving the pointer right turns right,
    /// moving it up looks up. Non-finite deltas are ignored.
    pub fn apply_pointer_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.pitch = clamp_pitch(self.pitch - dy * sensitivity);
        self.yaw -= dx * sensitivity;
    }

    /// Rotate a body-local direction by yaw only (the body never pitches or rolls)
    pub fn to_body_space(&self, local: Vec3) -> Vec3 {
        local.rotate_y(self.yaw)
    }

    /// Rotate a head-local direction by pitch, then yaw
    pub fn to_head_space(&self, local: Vec3) -> Vec3 {
        local.rotate_x(self.pitch).rotate_y(self.yaw)
    }

    /// Unit vector the head is looking along
    pub fn look_direction(&self) -> Vec3 {
        self.to_head_space(Vec3::FORWARD)
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    let limit = deg_to_rad(PITCH_LIMIT_DEGREES);
    pitch.clamp(-limit, limit)
}
