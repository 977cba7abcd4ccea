//! Error types for the job configuration codec.

use thiserror::Error;

/// Errors surfaced by encode, decode and codec registration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// The text could not be read as a JSON object of the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Input too large: {size} bytes (max: {max})")]
    InputTooLarge { size: usize, max: usize },

    /// A required field was absent (or null) after the full field scan
    #[error("{message}")]
    MissingRequiredField { field: String, message: String },

    /// A field was present but its value violates a domain rule
    #[error("{message}")]
    InvalidFieldValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No codec registered for {type_name}")]
    NotRegistered { type_name: String },

    #[error("Codec already registered for {type_name}")]
    AlreadyRegistered { type_name: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CodecError {
    pub fn missing(field: &str, message: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid(field: &str, value: impl ToString, message: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field: field.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Name of the offending field for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field, .. } | Self::InvalidFieldValue { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

/// Failure to parse a textual enum tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown enum value {enum_name}.{value}")]
pub struct UnknownVariant {
    pub enum_name: &'static str,
    pub value: String,
}

impl From<::config::ConfigError> for CodecError {
    fn from(error: ::config::ConfigError) -> Self {
        CodecError::Configuration(error.to_string())
    }
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
