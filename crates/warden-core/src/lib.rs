//! Warden Core - Foundational types for the Warden character controller
//!
//! This crate provides the core types that all other Warden crates depend on:
//! - `Vec2`, `Vec3` - Spatial types
//! - Angle helpers (`deg_to_rad`, `inverse_lerp`)
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, WardenError};
pub use types::{deg_to_rad, inverse_lerp, Vec2, Vec3};
