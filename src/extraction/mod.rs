//! Declarative-block extraction.
//!
//! Parses a Python fragment, finds the top-level configuration class and
//! turns its simple assignments into an ordered [`ConfigMap`].
//!
//! # Usage
//!
//! ```rust
//! use nodeconf::extraction::{extract, Literal};
//! use num_bigint::BigInt;
//!
//! let source = "class Config:\n    retries = 3\n    # number of attempts\n";
//! let config = extract(source).unwrap();
//!
//! let retries = config.get("retries").unwrap();
//! assert_eq!(retries.value, Literal::Int(BigInt::from(3)));
//! assert_eq!(retries.description, "number of attempts");
//! ```
//!
//! Extraction is all-or-nothing: a missing class, a syntax error or a single
//! non-literal attribute value fails the call.

pub mod attributes;
pub mod comments;
pub mod literal;
pub mod locator;
pub mod types;

pub use comments::{DescriptionSource, NextLineComment, NO_DESCRIPTION};
pub use literal::Literal;
pub use locator::DeclarationBlock;
pub use types::{AttributeEntry, ConfigMap};

use crate::config::ExtractorConfig;
use crate::errors::ExtractError;
use crate::parser::{normalize_line_endings, parse_module, LineIndex};
use tracing::debug;

/// Configured extractor.
///
/// Holds no parser state; each call builds and drops its own syntax tree,
/// so one instance can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extractor {
    block_name: String,
    max_fragment_bytes: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::with_config(&ExtractorConfig::default())
    }
}

impl Extractor {
    pub fn with_config(config: &ExtractorConfig) -> Self {
        Self {
            block_name: config.block_name.clone(),
            max_fragment_bytes: config.max_fragment_bytes,
        }
    }

    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    /// Extract the configuration block from `source`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::TooLarge`] if the fragment exceeds the size ceiling
    /// - [`ExtractError::Syntax`] if it is blank or not valid Python
    /// - [`ExtractError::NotFound`] if no top-level class has the block name
    /// - [`ExtractError::LiteralEvaluation`] if any attribute is not a literal
    pub fn extract(&self, source: &str) -> Result<ConfigMap, ExtractError> {
        let _span = tracing::debug_span!("extract", block = %self.block_name, bytes = source.len())
            .entered();

        if source.len() > self.max_fragment_bytes {
            return Err(ExtractError::TooLarge {
                size: source.len(),
                limit: self.max_fragment_bytes,
            });
        }

        let source = normalize_line_endings(source);
        let module = parse_module(&source)?;
        let lines = LineIndex::new(&source);
        let block = locator::locate_block(&module, &lines, &self.block_name)?;
        debug!(
            start_line = block.start_line,
            end_line = block.end_line,
            statements = block.body.len(),
            "located declaration block"
        );

        attributes::extract_attributes(&block, &source, &lines, &NextLineComment::new(&source))
    }
}

/// Extract the `Config` class from `source` with default settings.
pub fn extract(source: &str) -> Result<ConfigMap, ExtractError> {
    Extractor::default().extract(source)
}
