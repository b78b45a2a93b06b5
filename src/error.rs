//! Error types
//!
//! Parse-time failures are hard errors raised once per template string.
//! Per-file evaluation never fails; see the placeholder rules in the
//! evaluator and compiler.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which bound of a slice expression failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceBound {
    Start,
    End,
}

impl std::fmt::Display for SliceBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliceBound::Start => write!(f, "start"),
            SliceBound::End => write!(f, "end"),
        }
    }
}

/// Errors raised while tokenizing or parsing a template.
///
/// Every variant carries the byte offset into the template string where
/// the problem was detected.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "details")]
pub enum SyntaxError {
    /// A quoted string inside braces never reached its closing quote
    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    /// A token other than the required one was found
    #[error("Expected {expected} at position {position}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    /// A slice bound was not an integer literal
    #[error("Invalid slice {bound} index '{value}' at position {position}")]
    InvalidSliceIndex {
        bound: SliceBound,
        value: String,
        position: usize,
    },
}

impl SyntaxError {
    /// Byte offset of the error in the template source
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::UnterminatedString { position }
            | SyntaxError::UnexpectedToken { position, .. }
            | SyntaxError::InvalidSliceIndex { position, .. } => *position,
        }
    }
}

/// Errors from the arithmetic mini-evaluator.
///
/// These never reach template output: the index-expression layer maps
/// any of them to the raw index.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithError {
    #[error("Invalid character '{0}' in arithmetic expression")]
    InvalidCharacter(char),

    #[error("Unexpected end of arithmetic expression")]
    UnexpectedEnd,

    #[error("Unexpected token '{0}' in arithmetic expression")]
    UnexpectedToken(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Arithmetic result is not finite")]
    NonFinite,

    #[error("Arithmetic result {0} does not fit an index")]
    OutOfRange(f64),
}

/// Errors raised while reading engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid backend '{0}' (expected 'compiled' or 'interpreted')")]
    InvalidBackend(String),

    #[error("Invalid cache capacity '{0}'")]
    InvalidCapacity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_position() {
        let err = SyntaxError::UnexpectedToken {
            expected: "'}'".to_string(),
            found: "EOF".to_string(),
            position: 5,
        };
        assert_eq!(err.position(), 5);
        assert_eq!(err.to_string(), "Expected '}' at position 5, found EOF");
    }

    #[test]
    fn test_error_serialization() {
        let err = SyntaxError::InvalidSliceIndex {
            bound: SliceBound::End,
            value: "x".to_string(),
            position: 7,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "invalid_slice_index");
        assert_eq!(json["details"]["bound"], "end");
        assert_eq!(json["details"]["position"], 7);
    }
}
