//! The solver contract the character controller is written against

use warden_core::Vec3;

/// A collidable body the controller steers.
///
/// Implementations own collision resolution; the controller only supplies
/// velocities and offsets and reads back where the body ended up.
pub trait CharacterBody {
    /// Current body position
    fn position(&self) -> Vec3;

    /// Current rotation around the up axis, in radians
    fn yaw(&self) -> f32;

    /// Replace the body's rotation with a pure rotation around the up axis
    fn set_yaw(&mut self, yaw: f32);

    /// Whether the last slide was blocked downward by a standing surface
    fn is_on_floor(&self) -> bool;

    /// Gravity acceleration acting on the body
    fn gravity(&self) -> Vec3;

    /// Move by `velocity * dt`, sliding along whatever is hit.
    ///
    /// Returns the velocity left after collision response.
    fn move_and_slide(&mut self, velocity: Vec3, dt: f32) -> Vec3;

    /// Move by `offset` without any collision checks
    fn translate(&mut self, offset: Vec3);

    /// Enable or disable the body's collision shape
    fn set_collision_enabled(&mut self, enabled: bool);

    fn is_collision_enabled(&self) -> bool;
}
