//! Grounded/Freefly movement run on each physics tick

use crate::config::{CapabilityFlags, MovementConfig};
use crate::look::Orientation;
use warden_core::{Vec2, Vec3};
use warden_physics::CharacterBody;

/// Exactly one of these holds at any time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControllerMode {
    #[default]
    Grounded,
    Freefly,
}

/// Holds a rising edge seen during the input phase until a physics tick takes it.
///
/// Several presses before the next tick collapse into one edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLatch {
    pending: bool,
}

impl EdgeLatch {
    pub fn record(&mut self, rising: bool) {
        self.pending |= rising;
    }

    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Input sampled for one physics tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Strafe on x (right positive), forward/back on y (back positive), length <= 1
    pub direction: Vec2,
    pub jump_pressed: bool,
    pub sprint_held: bool,
    pub freefly_toggled: bool,
}

/// What a physics tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Moved in freefly mode; never reported as a position change
    Flew,
    /// Slide-moved in grounded mode. `commanded_move` is true when the
    /// horizontal velocity handed to the solver was non-zero.
    Slid { commanded_move: bool },
}

/// Mode and velocity owned by the physics phase
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementState {
    pub mode: ControllerMode,
    pub velocity: Vec3,
}

impl MovementState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one physics tick
    pub fn physics_step<B: CharacterBody + ?Sized>(
        &mut self,
        body: &mut B,
        input: &TickInput,
        speeds: &MovementConfig,
        caps: CapabilityFlags,
        look: &Orientation,
        dt: f32,
    ) -> TickOutcome {
        if caps.can_freefly && input.freefly_toggled {
            self.toggle_freefly(body);
        }

        let local = Vec3::new(input.direction.x, 0.0, input.direction.y);

        if self.mode == ControllerMode::Freefly {
            let motion = look.to_head_space(local).normalized() * (speeds.freefly_speed * dt);
            body.translate(motion);
            return TickOutcome::Flew;
        }

        if caps.has_gravity && !body.is_on_floor() {
            self.velocity += body.gravity() * dt;
        }

        if caps.can_jump && input.jump_pressed && body.is_on_floor() {
            self.velocity.y = speeds.jump_velocity;
        }

        let speed = if caps.can_sprint && input.sprint_held {
            speeds.sprint_speed
        } else {
            speeds.base_speed
        };

        if caps.can_move {
            let dir = look.to_body_space(local).normalized();
            self.velocity.x = dir.x * speed;
            self.velocity.z = dir.z * speed;
        } else {
            self.velocity.x = 0.0;
            self.velocity.z = 0.0;
        }

        let commanded_move = self.velocity.x != 0.0 || self.velocity.z != 0.0;
        self.velocity = body.move_and_slide(self.velocity, dt);

        TickOutcome::Slid { commanded_move }
    }

    fn toggle_freefly<B: CharacterBody + ?Sized>(&mut self, body: &mut B) {
        match self.mode {
            ControllerMode::Grounded => {
                body.set_collision_enabled(false);
                self.mode = ControllerMode::Freefly;
                self.velocity = Vec3::ZERO;
                tracing::debug!("Entering freefly");
            }
            ControllerMode::Freefly => {
                body.set_collision_enabled(true);
                self.mode = ControllerMode::Grounded;
                tracing::debug!("Leaving freefly");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedBody, GRAVITY};

    const DT: f32 = 1.0 / 60.0;

    fn all_caps() -> CapabilityFlags {
        CapabilityFlags {
            can_move: true,
            has_gravity: true,
            can_jump: true,
            can_sprint: true,
            can_freefly: true,
        }
    }

    fn forward() -> TickInput {
        TickInput {
            direction: Vec2::new(0.0, -1.0),
            ..TickInput::default()
        }
    }

    #[test]
    fn test_edge_latch_collapses_presses() {
        let mut latch = EdgeLatch::default();
        latch.record(true);
        latch.record(false);
        latch.record(true);
        assert!(latch.is_pending());
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_enter_freefly() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState {
            mode: ControllerMode::Grounded,
            velocity: Vec3::new(3.0, 1.0, -2.0),
        };
        let input = TickInput {
            freefly_toggled: true,
            ..TickInput::default()
        };

        let outcome = state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );

        assert_eq!(outcome, TickOutcome::Flew);
        assert_eq!(state.mode, ControllerMode::Freefly);
        assert!(!body.collision_enabled);
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(body.slide_calls, 0);
    }

    #[test]
    fn test_leave_freefly_restores_collision() {
        let mut body = ScriptedBody::standing();
        body.collision_enabled = false;
        let mut state = MovementState {
            mode: ControllerMode::Freefly,
            velocity: Vec3::ZERO,
        };
        let input = TickInput {
            freefly_toggled: true,
            ..TickInput::default()
        };

        let outcome = state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );

        assert_eq!(state.mode, ControllerMode::Grounded);
        assert!(body.collision_enabled);
        assert!(matches!(outcome, TickOutcome::Slid { .. }));
    }

    #[test]
    fn test_freefly_toggle_ignored_without_capability() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState::new();
        let caps = CapabilityFlags {
            can_freefly: false,
            ..all_caps()
        };
        let input = TickInput {
            freefly_toggled: true,
            ..TickInput::default()
        };

        state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            caps,
            &Orientation::default(),
            DT,
        );

        assert_eq!(state.mode, ControllerMode::Grounded);
        assert!(body.collision_enabled);
    }

    #[test]
    fn test_freefly_follows_head_pitch() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState {
            mode: ControllerMode::Freefly,
            velocity: Vec3::ZERO,
        };
        body.collision_enabled = false;
        let look = Orientation::new(0.0, warden_core::deg_to_rad(45.0));
        let speeds = MovementConfig::default();

        state.physics_step(&mut body, &forward(), &speeds, all_caps(), &look, DT);

        let travelled = body.position.length();
        assert!((travelled - speeds.freefly_speed * DT).abs() < 1e-4);
        assert!(body.position.y > 0.0);
        assert!(body.position.z < 0.0);
        // No gravity in freefly
        assert_eq!(state.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_sprint_overrides_base_speed() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState::new();
        let input = TickInput {
            sprint_held: true,
            ..forward()
        };

        state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );

        assert!((state.velocity.horizontal_length() - 10.0).abs() < 1e-4);
        assert!(state.velocity.z < 0.0);
    }

    #[test]
    fn test_sprint_requires_capability() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState::new();
        let input = TickInput {
            sprint_held: true,
            ..forward()
        };
        let caps = CapabilityFlags {
            can_sprint: false,
            ..all_caps()
        };

        state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            caps,
            &Orientation::default(),
            DT,
        );

        assert!((state.velocity.horizontal_length() - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_direction_stops_horizontal_motion() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState {
            mode: ControllerMode::Grounded,
            velocity: Vec3::new(4.0, 0.0, 4.0),
        };

        let outcome = state.physics_step(
            &mut body,
            &TickInput::default(),
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );

        assert_eq!(state.velocity.x, 0.0);
        assert_eq!(state.velocity.z, 0.0);
        assert_eq!(
            outcome,
            TickOutcome::Slid {
                commanded_move: false
            }
        );
    }

    #[test]
    fn test_movement_follows_yaw() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState::new();
        let look = Orientation::new(std::f32::consts::FRAC_PI_2, 0.6);

        state.physics_step(
            &mut body,
            &forward(),
            &MovementConfig::default(),
            all_caps(),
            &look,
            DT,
        );

        // Quarter turn left: forward becomes -X, pitch does not tilt ground motion
        assert!((state.velocity.x + 7.0).abs() < 1e-4);
        assert!(state.velocity.z.abs() < 1e-4);
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_gravity_when_airborne() {
        let mut body = ScriptedBody::airborne(10.0);
        let mut state = MovementState::new();

        state.physics_step(
            &mut body,
            &TickInput::default(),
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );

        let expected = GRAVITY * DT;
        assert!((state.velocity.y - expected).abs() < 1e-6);
        assert_eq!(body.last_slide_velocity.map(|v| v.y), Some(expected));
    }

    #[test]
    fn test_no_gravity_on_floor_or_without_capability() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState::new();
        state.physics_step(
            &mut body,
            &TickInput::default(),
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );
        assert_eq!(state.velocity.y, 0.0);

        let mut body = ScriptedBody::airborne(10.0);
        let mut state = MovementState::new();
        let caps = CapabilityFlags {
            has_gravity: false,
            ..all_caps()
        };
        state.physics_step(
            &mut body,
            &TickInput::default(),
            &MovementConfig::default(),
            caps,
            &Orientation::default(),
            DT,
        );
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_jump_overwrites_vertical_velocity() {
        let mut body = ScriptedBody::standing();
        let mut state = MovementState {
            mode: ControllerMode::Grounded,
            velocity: Vec3::new(0.0, -3.0, 0.0),
        };
        let input = TickInput {
            jump_pressed: true,
            ..TickInput::default()
        };

        state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );

        assert_eq!(state.velocity.y, 4.5);
        assert!(!body.on_floor);
    }

    #[test]
    fn test_jump_requires_floor_and_capability() {
        let input = TickInput {
            jump_pressed: true,
            ..TickInput::default()
        };

        let mut body = ScriptedBody::airborne(2.0);
        let mut state = MovementState::new();
        state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );
        assert!(state.velocity.y < 0.0);

        let mut body = ScriptedBody::standing();
        let mut state = MovementState::new();
        let caps = CapabilityFlags {
            can_jump: false,
            ..all_caps()
        };
        state.physics_step(
            &mut body,
            &input,
            &MovementConfig::default(),
            caps,
            &Orientation::default(),
            DT,
        );
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_cannot_move_keeps_vertical_velocity() {
        let mut body = ScriptedBody::airborne(10.0);
        let mut state = MovementState {
            mode: ControllerMode::Grounded,
            velocity: Vec3::new(5.0, -1.0, 5.0),
        };
        let caps = CapabilityFlags {
            can_move: false,
            ..all_caps()
        };

        let outcome = state.physics_step(
            &mut body,
            &forward(),
            &MovementConfig::default(),
            caps,
            &Orientation::default(),
            DT,
        );

        assert_eq!(state.velocity.x, 0.0);
        assert_eq!(state.velocity.z, 0.0);
        assert!((state.velocity.y - (-1.0 + GRAVITY * DT)).abs() < 1e-6);
        assert_eq!(
            outcome,
            TickOutcome::Slid {
                commanded_move: false
            }
        );
    }

    #[test]
    fn test_commanded_move_reported_even_when_blocked() {
        let mut body = ScriptedBody::standing();
        body.wall = true;
        let mut state = MovementState::new();

        let outcome = state.physics_step(
            &mut body,
            &forward(),
            &MovementConfig::default(),
            all_caps(),
            &Orientation::default(),
            DT,
        );

        assert_eq!(
            outcome,
            TickOutcome::Slid {
                commanded_move: true
            }
        );
        assert_eq!(body.position, Vec3::ZERO);
        assert_eq!(state.velocity.horizontal_length(), 0.0);
    }
}
