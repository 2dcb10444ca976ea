//! Configuration for extraction and output.
//!
//! Settings come from a `.nodeconf.toml` file (see [`loader`]) and are
//! overridden by command-line flags. Every section is optional.
//!
//! ```toml
//! [extractor]
//! block_name = "Config"
//! max_fragment_bytes = 1048576
//!
//! [output]
//! format = "json"
//! pretty = true
//! ```

pub mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Name of the class the extractor looks for by default.
pub const DEFAULT_BLOCK_NAME: &str = "Config";

/// Default fragment size ceiling (1 MiB).
pub const DEFAULT_MAX_FRAGMENT_BYTES: usize = 1024 * 1024;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NodeconfConfig {
    #[serde(default)]
    pub extractor: ExtractorConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl NodeconfConfig {
    /// Check every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extractor.validate()
    }
}

/// Extractor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Name of the top-level class holding the settings
    #[serde(default = "default_block_name")]
    pub block_name: String,

    /// Fragments larger than this are rejected before parsing
    #[serde(default = "default_max_fragment_bytes")]
    pub max_fragment_bytes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            block_name: default_block_name(),
            max_fragment_bytes: default_max_fragment_bytes(),
        }
    }
}

impl ExtractorConfig {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.block_name.is_empty() {
            problems.push("extractor.block_name must not be empty".to_string());
        } else if !is_identifier(&self.block_name) {
            problems.push(format!(
                "extractor.block_name '{}' is not a valid Python identifier",
                self.block_name
            ));
        }
        if self.max_fragment_bytes == 0 {
            problems.push("extractor.max_fragment_bytes must be greater than 0".to_string());
        }
        problems
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}

pub fn default_block_name() -> String {
    DEFAULT_BLOCK_NAME.to_string()
}

pub fn default_max_fragment_bytes() -> usize {
    DEFAULT_MAX_FRAGMENT_BYTES
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Node envelope as JSON
    #[default]
    Json,
    /// Human-readable table
    Terminal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeconfConfig::default();
        assert_eq!(config.extractor.block_name, "Config");
        assert_eq!(config.extractor.max_fragment_bytes, 1024 * 1024);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_collects_all_problems() {
        let config = NodeconfConfig {
            extractor: ExtractorConfig {
                block_name: "not valid".to_string(),
                max_fragment_bytes: 0,
            },
            ..Default::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("not a valid Python identifier"), "{message}");
        assert!(message.contains("greater than 0"), "{message}");
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("Config"));
        assert!(is_identifier("_Settings2"));
        assert!(!is_identifier("2Config"));
        assert!(!is_identifier("my-config"));
        assert!(!is_identifier(""));
    }
}
