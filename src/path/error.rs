//! Error types for path expression parsing.

use std::fmt;

/// Errors that can occur while parsing a path expression.
///
/// Malformed path syntax is rejected here, before any traversal is
/// constructed; the traversal engine itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Unexpected token at a specific position.
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    InvalidSyntax { message: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "Unexpected token '{}' at position {}, expected {}",
                found, position, expected
            ),
            PathError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            PathError::InvalidSyntax { message } => {
                write!(f, "Invalid path syntax: {}", message)
            }
        }
    }
}

impl std::error::Error for PathError {}
