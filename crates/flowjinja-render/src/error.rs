//! Error types for template rendering.
//!
//! This module provides [`RenderError`], the primary error type for all rendering
//! operations. It abstracts over the underlying template engine's errors, providing
//! a stable public API.
//!
//! The variants follow the failure taxonomy of the render pipeline: a template
//! that cannot be located ([`RenderError::TemplateNotFound`]), a template that
//! cannot be parsed ([`RenderError::Syntax`]), and everything that goes wrong
//! during evaluation ([`RenderError::Runtime`]).

use std::fmt;

/// Error type for template rendering operations.
///
/// This error type provides a stable API that doesn't expose implementation details
/// of the underlying template engine. All public rendering functions return this type.
#[derive(Debug)]
pub enum RenderError {
    /// Template could not be resolved from the snapshot or any search root.
    TemplateNotFound(String),

    /// Template body or fragment failed to parse.
    Syntax(String),

    /// Evaluation failure: undefined reference, unknown filter or function,
    /// or a registered filter/extension raising during evaluation.
    Runtime(String),

    /// Data serialization error.
    Serialization(String),

    /// I/O error (e.g., reading a configuration file).
    Io(std::io::Error),

    /// Engine configuration could not be loaded or parsed.
    Config(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::Syntax(msg) => write!(f, "template syntax error: {}", msg),
            RenderError::Runtime(msg) => write!(f, "template runtime error: {}", msg),
            RenderError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            RenderError::Io(err) => write!(f, "I/O error: {}", err),
            RenderError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}

// Conversion from minijinja::Error - this keeps internal compatibility
impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError | ErrorKind::BadEscape => RenderError::Syntax(err.to_string()),
            ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod
            | ErrorKind::InvalidOperation => RenderError::Runtime(err.to_string()),
            ErrorKind::BadSerialization => RenderError::Serialization(err.to_string()),
            _ => RenderError::Runtime(err.to_string()),
        }
    }
}
