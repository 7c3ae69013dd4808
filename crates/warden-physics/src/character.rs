//! Character body using Rapier's kinematic character controller

use crate::body::CharacterBody;
use crate::world::PhysicsWorld;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use warden_core::Vec3;

/// Downward speed applied while standing so ground contact keeps being detected
const GROUND_STICK_SPEED: f32 = 0.1;

/// How far below the body a surface still counts as floor
const FLOOR_PROBE_DISTANCE: f32 = 0.05;

/// Capsule dimensions of the character collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleShape {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for CapsuleShape {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.4,
        }
    }
}

/// First-person character body wrapping Rapier's KinematicCharacterController.
///
/// The body owns the world it lives in; level geometry is added through
/// [`RapierCharacterBody::world_mut`].
pub struct RapierCharacterBody {
    world: PhysicsWorld,
    controller: KinematicCharacterController,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    position: Vec3,
    yaw: f32,
    on_floor: bool,
    collision_enabled: bool,
}

impl RapierCharacterBody {
    pub fn new(mut world: PhysicsWorld, spawn: Vec3, shape: CapsuleShape) -> Self {
        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(0.5),
                min_width: CharacterLength::Absolute(0.2),
                include_dynamic_bodies: false,
            }),
            snap_to_ground: Some(CharacterLength::Absolute(0.2)),
            ..KinematicCharacterController::default()
        };

        let body = world.insert_rigid_body(
            RigidBodyBuilder::kinematic_position_based()
                .translation(vector![spawn.x, spawn.y, spawn.z])
                .build(),
        );
        let collider = world.insert_collider_with_parent(
            ColliderBuilder::capsule_y(shape.half_height, shape.radius).build(),
            body,
        );

        Self {
            world,
            controller,
            body,
            collider,
            position: spawn,
            yaw: 0.0,
            on_floor: false,
            collision_enabled: true,
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    /// Sweep the collider a short way down from `position`. Anything that
    /// stops the sweep is floor.
    fn probe_floor(&self, position: Vec3, dt: f32) -> bool {
        let Some(collider) = self.world.collider_set.get(self.collider) else {
            return false;
        };
        let desired = vector![0.0, -FLOOR_PROBE_DISTANCE, 0.0];
        let probe = self.controller.move_shape(
            dt,
            &self.world.rigid_body_set,
            &self.world.collider_set,
            &self.world.query_pipeline,
            collider.shape(),
            &Isometry::translation(position.x, position.y, position.z),
            desired,
            QueryFilter::default().exclude_rigid_body(self.body),
            |_| {},
        );
        probe.grounded || probe.translation.y > desired.y * 0.5
    }

    /// Push the tracked position and yaw to Rapier as the next kinematic target
    fn apply_kinematic_target(&mut self) {
        let translation = vector![self.position.x, self.position.y, self.position.z];
        let rotation = vector![0.0, self.yaw, 0.0];
        if let Some(body) = self.world.get_rigid_body_mut(self.body) {
            body.set_next_kinematic_position(Isometry::new(translation, rotation));
        }
    }
}

impl CharacterBody for RapierCharacterBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.apply_kinematic_target();
    }

    fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    fn gravity(&self) -> Vec3 {
        self.world.gravity_vec()
    }

    fn move_and_slide(&mut self, velocity: Vec3, dt: f32) -> Vec3 {
        if dt <= 0.0 {
            return velocity;
        }

        // Bring the query pipeline and the body up to date before casting
        self.world.step(dt);

        let vertical = if self.on_floor && velocity.y <= 0.0 {
            -GROUND_STICK_SPEED
        } else {
            velocity.y
        };
        let desired = vector![velocity.x * dt, vertical * dt, velocity.z * dt];

        let (Some(collider), Some(body)) = (
            self.world.collider_set.get(self.collider),
            self.world.rigid_body_set.get(self.body),
        ) else {
            return velocity;
        };

        let corrected = self.controller.move_shape(
            dt,
            &self.world.rigid_body_set,
            &self.world.collider_set,
            &self.world.query_pipeline,
            collider.shape(),
            body.position(),
            desired,
            QueryFilter::default().exclude_rigid_body(self.body),
            |_| {},
        );

        let moved = Vec3::new(
            corrected.translation.x,
            corrected.translation.y,
            corrected.translation.z,
        );
        self.position += moved;
        self.apply_kinematic_target();

        // `grounded` drops out for single ticks while sliding across flat ground
        self.on_floor = corrected.grounded
            || (self.collision_enabled && velocity.y <= 0.0 && self.probe_floor(self.position, dt));

        let mut remaining = moved * (1.0 / dt);
        if self.on_floor && velocity.y <= 0.0 {
            remaining.y = 0.0;
        } else {
            remaining.y = if corrected.translation.y < desired.y * 0.5 && velocity.y > 0.0 {
                // Ceiling hit
                0.0
            } else {
                velocity.y
            };
        }
        remaining
    }

    fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.apply_kinematic_target();
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        if let Some(collider) = self.world.collider_set.get_mut(self.collider) {
            collider.set_enabled(enabled);
        }
        self.collision_enabled = enabled;
        if !enabled {
            self.on_floor = false;
        }
    }

    fn is_collision_enabled(&self) -> bool {
        self.collision_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn body_over_ground(spawn_y: f32) -> RapierCharacterBody {
        let mut world = PhysicsWorld::new();
        world.add_static_cuboid(Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0));
        RapierCharacterBody::new(world, Vec3::new(0.0, spawn_y, 0.0), CapsuleShape::default())
    }

    fn settle(body: &mut RapierCharacterBody) {
        let mut velocity = Vec3::ZERO;
        for _ in 0..180 {
            if !body.is_on_floor() {
                velocity += body.gravity() * DT;
            }
            velocity = body.move_and_slide(velocity, DT);
        }
    }

    #[test]
    fn test_falls_onto_ground() {
        let mut body = body_over_ground(3.0);
        settle(&mut body);

        assert!(body.is_on_floor());
        // Capsule bottom sits at center - (half_height + radius)
        assert!((body.position().y - 0.9).abs() < 0.1);
    }

    #[test]
    fn test_slides_horizontally_on_ground() {
        let mut body = body_over_ground(1.0);
        settle(&mut body);
        let start = body.position();

        for _ in 0..60 {
            body.move_and_slide(Vec3::new(2.0, 0.0, 0.0), DT);
        }

        let moved = body.position().x - start.x;
        assert!((moved - 2.0).abs() < 0.2);
        assert!(body.is_on_floor());
    }

    #[test]
    fn test_stays_on_floor_while_walking() {
        let mut body = body_over_ground(1.0);
        settle(&mut body);
        let rest_y = body.position().y;

        let mut velocity = Vec3::ZERO;
        for tick in 0..120 {
            velocity.x = 7.0;
            velocity.z = 0.0;
            if !body.is_on_floor() {
                velocity += body.gravity() * DT;
            }
            velocity = body.move_and_slide(velocity, DT);
            assert!(body.is_on_floor(), "lost floor contact on tick {tick}");
            assert_eq!(velocity.y, 0.0);
        }
        assert!((body.position().y - rest_y).abs() < 0.05);
        assert!(body.position().x > 12.0);
    }

    #[test]
    fn test_airborne_body_is_not_on_floor() {
        let mut body = body_over_ground(3.0);
        body.move_and_slide(Vec3::ZERO, DT);
        assert!(!body.is_on_floor());

        settle(&mut body);
        body.move_and_slide(Vec3::new(0.0, 4.5, 0.0), DT);
        assert!(!body.is_on_floor());
    }

    #[test]
    fn test_translate_ignores_collision() {
        let mut body = body_over_ground(1.0);
        body.set_collision_enabled(false);
        assert!(!body.is_collision_enabled());

        body.translate(Vec3::new(0.0, -5.0, 0.0));
        assert!((body.position().y + 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut body = body_over_ground(1.0);
        let velocity = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(body.move_and_slide(velocity, 0.0), velocity);
        assert_eq!(body.position(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_yaw_round_trips() {
        let mut body = body_over_ground(1.0);
        body.set_yaw(1.25);
        assert_eq!(body.yaw(), 1.25);
    }
}
