//! Warden Physics - collision solver seam
//!
//! Provides the body the character controller moves:
//! - `CharacterBody` — what the controller needs from a collision solver
//! - `PhysicsWorld` — wraps Rapier pipeline, body/collider sets
//! - `RapierCharacterBody` — `CharacterBody` backed by Rapier's kinematic character controller

pub mod body;
pub mod character;
pub mod world;

pub use body::CharacterBody;
pub use character::{CapsuleShape, RapierCharacterBody};
pub use world::PhysicsWorld;
