//! Controller configuration loaded from TOML
//!
//! ```toml
//! [capabilities]
//! can_sprint = true
//!
//! [speeds]
//! base_speed = 6.0
//!
//! [input]
//! sprint = "sprint"
//! ```
//!
//! Every table and field is optional; omitted values keep their defaults.

use serde::Deserialize;
use std::path::Path;
use warden_core::{Result, WardenError};

/// Behaviour families the controller may use.
///
/// Flags only ever go from `true` to `false` (see [`crate::validate_bindings`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CapabilityFlags {
    pub can_move: bool,
    pub has_gravity: bool,
    pub can_jump: bool,
    pub can_sprint: bool,
    pub can_freefly: bool,
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self {
            can_move: true,
            has_gravity: true,
            can_jump: true,
            can_sprint: false,
            can_freefly: false,
        }
    }
}

/// Speed and sensitivity tunables
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Radians of rotation per unit of pointer motion
    pub look_speed: f32,
    /// Walking speed (units/second)
    pub base_speed: f32,
    /// Vertical velocity set by a jump (units/second)
    pub jump_velocity: f32,
    /// Speed while the sprint action is held (units/second)
    pub sprint_speed: f32,
    /// Speed in freefly mode (units/second)
    pub freefly_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            look_speed: 0.002,
            base_speed: 7.0,
            jump_velocity: 4.5,
            sprint_speed: 10.0,
            freefly_speed: 25.0,
        }
    }
}

/// Names of the input actions each logical control reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    pub left: String,
    pub right: String,
    pub forward: String,
    pub back: String,
    pub jump: String,
    pub sprint: String,
    pub freefly: String,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            left: "ui_left".into(),
            right: "ui_right".into(),
            forward: "ui_up".into(),
            back: "ui_down".into(),
            jump: "ui_accept".into(),
            sprint: "sprint".into(),
            freefly: "freefly".into(),
        }
    }
}

/// Everything the controller is configured with at instantiation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub capabilities: CapabilityFlags,
    pub speeds: MovementConfig,
    pub input: InputBindings,
}

impl ControllerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject tunables that are negative, non-finite or absurdly large
    pub fn validate(&self) -> Result<()> {
        let speeds = &self.speeds;
        check_range("speeds.look_speed", speeds.look_speed, 0.0, 1.0)?;
        check_range("speeds.base_speed", speeds.base_speed, 0.0, 1000.0)?;
        check_range("speeds.jump_velocity", speeds.jump_velocity, 0.0, 1000.0)?;
        check_range("speeds.sprint_speed", speeds.sprint_speed, 0.0, 1000.0)?;
        check_range("speeds.freefly_speed", speeds.freefly_speed, 0.0, 1000.0)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f32, min: f64, max: f64) -> Result<()> {
    let value = value as f64;
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(WardenError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert!(config.capabilities.can_move);
        assert!(config.capabilities.has_gravity);
        assert!(config.capabilities.can_jump);
        assert!(!config.capabilities.can_sprint);
        assert!(!config.capabilities.can_freefly);
        assert_eq!(config.speeds.base_speed, 7.0);
        assert_eq!(config.speeds.sprint_speed, 10.0);
        assert_eq!(config.speeds.freefly_speed, 25.0);
        assert_eq!(config.speeds.jump_velocity, 4.5);
        assert_eq!(config.input.forward, "ui_up");
        assert_eq!(config.input.jump, "ui_accept");
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = ControllerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let config = ControllerConfig::from_toml_str(
            r#"
            [capabilities]
            can_sprint = true

            [speeds]
            base_speed = 5.5

            [input]
            sprint = "run"
            "#,
        )
        .unwrap();

        assert!(config.capabilities.can_sprint);
        assert!(config.capabilities.can_jump);
        assert_eq!(config.speeds.base_speed, 5.5);
        assert_eq!(config.speeds.sprint_speed, 10.0);
        assert_eq!(config.input.sprint, "run");
        assert_eq!(config.input.left, "ui_left");
    }

    #[test]
    fn test_negative_speed_rejected() {
        let err = ControllerConfig::from_toml_str("[speeds]\nbase_speed = -3.0").unwrap_err();
        assert!(matches!(
            err,
            WardenError::ValueOutOfRange { ref field, .. } if field == "speeds.base_speed"
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = ControllerConfig::from_toml_str("[speeds\nbase_speed = 1").unwrap_err();
        assert!(matches!(err, WardenError::TomlParseError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ControllerConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, WardenError::IoError(_)));
    }
}
