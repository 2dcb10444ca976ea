// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod io;
pub mod logging;
pub mod node;
pub mod parser;

// Re-export commonly used types
pub use crate::config::{ExtractorConfig, NodeconfConfig, OutputFormat};
pub use crate::errors::{ConfigError, ErrorCode, ExtractError};
pub use crate::extraction::{
    extract, AttributeEntry, ConfigMap, Extractor, Literal, NO_DESCRIPTION,
};
pub use crate::node::{ErrorEnvelope, NodeOutcome, ParsedNode};
