#![forbid(unsafe_code)]

//! Error types for page mounting, configuration and event handling.
//!
//! Validation failures on the contact form are not errors: they are
//! [`FieldError`](crate::form::FieldError) values rendered inline. The types
//! here cover the ambient failures around them: a configuration that cannot
//! be parsed or is out of range, and markup that is missing an element a
//! handler cannot do without.

use core::fmt;

/// Configuration parse and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Malformed JSON.
    Json(String),
    /// A field parsed but holds an unusable value.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "config JSON parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors surfaced by [`Page`](crate::page::Page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// A required element is absent from the document.
    MissingElement { what: String },
    /// The page configuration was rejected.
    Config(ConfigError),
    /// The host refused a DOM operation.
    Host(String),
}

impl PageError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement { what: what.into() }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement { what } => write!(f, "required element missing: {what}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Host(msg) => write!(f, "host DOM operation failed: {msg}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::MissingElement { .. } | Self::Host(_) => None,
        }
    }
}

impl From<ConfigError> for PageError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
