//! In-memory body used by the controller tests

use warden_core::Vec3;
use warden_physics::CharacterBody;

pub const GRAVITY: f32 = -9.8;

/// Flat floor at y = 0 and an optional wall that absorbs all horizontal motion
pub struct ScriptedBody {
    pub position: Vec3,
    pub yaw: f32,
    pub on_floor: bool,
    pub collision_enabled: bool,
    pub wall: bool,
    pub slide_calls: u32,
    pub last_slide_velocity: Option<Vec3>,
}

impl ScriptedBody {
    pub fn standing() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            on_floor: true,
            collision_enabled: true,
            wall: false,
            slide_calls: 0,
            last_slide_velocity: None,
        }
    }

    pub fn airborne(height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, height, 0.0),
            on_floor: false,
            ..Self::standing()
        }
    }
}

impl CharacterBody for ScriptedBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    fn gravity(&self) -> Vec3 {
        Vec3::new(0.0, GRAVITY, 0.0)
    }

    fn move_and_slide(&mut self, velocity: Vec3, dt: f32) -> Vec3 {
        self.slide_calls += 1;
        self.last_slide_velocity = Some(velocity);

        let mut remaining = velocity;
        if self.wall {
            remaining.x = 0.0;
            remaining.z = 0.0;
        }
        self.position += remaining * dt;

        if self.collision_enabled && self.position.y <= 0.0 {
            self.position.y = 0.0;
            remaining.y = remaining.y.max(0.0);
        }
        self.on_floor = self.collision_enabled && self.position.y <= 0.0 && remaining.y <= 0.0;
        remaining
    }

    fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
    }

    fn is_collision_enabled(&self) -> bool {
        self.collision_enabled
    }
}
