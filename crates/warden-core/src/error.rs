//! Error types for Warden

use thiserror::Error;

/// The main error type for Warden operations
#[derive(Debug, Error)]
pub enum WardenError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Unknown input binding: {0}")]
    UnknownBinding(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for Warden operations
pub type Result<T> = std::result::Result<T, WardenError>;

impl From<toml::de::Error> for WardenError {
    fn from(err: toml::de::Error) -> Self {
        WardenError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_converts() {
        let err: WardenError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, WardenError::TomlParseError(_)));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = WardenError::ValueOutOfRange {
            field: "speeds.base".into(),
            min: 0.0,
            max: 100.0,
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: speeds.base must be between 0 and 100, got -1"
        );
    }
}
