//! Error types for configuration extraction.
//!
//! Every failure of an extraction call is reported through [`ExtractError`],
//! a single discriminated error. Configuration loading failures use
//! [`ConfigError`]. Both carry a stable [`ErrorCode`] for programmatic
//! handling:
//!
//! - E010-E019: Parse errors
//! - E020-E029: Configuration errors
//! - E030-E039: Extraction errors
//!
//! # Example
//!
//! ```rust
//! use nodeconf::errors::{ErrorCode, ExtractError};
//!
//! let err = ExtractError::not_found("Config");
//! assert_eq!(err.code(), ErrorCode::EXTRACT_NOT_FOUND);
//! ```

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Parse error - the fragment is not valid Python
    pub const PARSE_SYNTAX: ErrorCode = ErrorCode("E010");
    /// Parse error - the fragment exceeds the configured size ceiling
    pub const PARSE_TOO_LARGE: ErrorCode = ErrorCode("E011");

    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - malformed file
    pub const CONFIG_MALFORMED: ErrorCode = ErrorCode("E021");
    /// Config error - file could not be read
    pub const CONFIG_UNREADABLE: ErrorCode = ErrorCode("E022");

    /// Extraction error - declaration block not found
    pub const EXTRACT_NOT_FOUND: ErrorCode = ErrorCode("E030");
    /// Extraction error - attribute value is not a literal
    pub const EXTRACT_NOT_LITERAL: ErrorCode = ErrorCode("E031");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure of a single extraction call.
///
/// No variant ever accompanies a partial result: an extraction either yields
/// a complete [`ConfigMap`](crate::ConfigMap) or one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The fragment could not be parsed as Python.
    #[error("Syntax error{}: {message}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Syntax {
        message: String,
        /// 1-based line of the first offending node, when known
        line: Option<usize>,
    },

    /// The fragment exceeds the configured size ceiling.
    #[error("Fragment is {size} bytes, above the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    /// No top-level class with the designated name exists.
    #[error("No '{block}' class found in the provided code")]
    NotFound { block: String },

    /// An attribute's value is not a statically evaluable literal.
    #[error("Attribute '{attribute}' is not a literal: {message}")]
    LiteralEvaluation { attribute: String, message: String },
}

impl ExtractError {
    pub fn syntax(message: impl Into<String>, line: Option<usize>) -> Self {
        Self::Syntax {
            message: message.into(),
            line,
        }
    }

    pub fn not_found(block: impl Into<String>) -> Self {
        Self::NotFound {
            block: block.into(),
        }
    }

    pub fn literal(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LiteralEvaluation {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Get the structured error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Syntax { .. } => ErrorCode::PARSE_SYNTAX,
            Self::TooLarge { .. } => ErrorCode::PARSE_TOO_LARGE,
            Self::NotFound { .. } => ErrorCode::EXTRACT_NOT_FOUND,
            Self::LiteralEvaluation { .. } => ErrorCode::EXTRACT_NOT_LITERAL,
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Failed to read {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Invalid(_) => ErrorCode::CONFIG_INVALID,
            Self::Malformed { .. } => ErrorCode::CONFIG_MALFORMED,
            Self::Unreadable { .. } => ErrorCode::CONFIG_UNREADABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_message_with_line() {
        let err = ExtractError::syntax("unexpected token", Some(3));
        assert_eq!(err.to_string(), "Syntax error at line 3: unexpected token");
    }

    #[test]
    fn test_syntax_message_without_line() {
        let err = ExtractError::syntax("empty fragment", None);
        assert_eq!(err.to_string(), "Syntax error: empty fragment");
    }

    #[test]
    fn test_codes_by_variant() {
        assert_eq!(ExtractError::syntax("x", None).code().as_str(), "E010");
        assert_eq!(
            ExtractError::TooLarge { size: 2, limit: 1 }.code().as_str(),
            "E011"
        );
        assert_eq!(ExtractError::not_found("Config").code().as_str(), "E030");
        assert_eq!(ExtractError::literal("x", "call").code().as_str(), "E031");
    }

    #[test]
    fn test_literal_error_names_attribute() {
        let err = ExtractError::literal("retries", "function call `f()`");
        assert_eq!(
            err.to_string(),
            "Attribute 'retries' is not a literal: function call `f()`"
        );
    }

    #[test]
    fn test_config_error_codes() {
        assert_eq!(
            ConfigError::Invalid("block_name".into()).code(),
            ErrorCode::CONFIG_INVALID
        );
    }
}
