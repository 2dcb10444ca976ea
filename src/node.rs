//! Node envelopes exchanged with the surrounding services.
//!
//! A node is a named Python fragment. Processing it yields the
//! `{node_name, configurations, full_code}` envelope that persistence and
//! project generation consume; failures are reported as
//! `{node_name, error, code}`.

use crate::errors::{ErrorCode, ExtractError};
use crate::extraction::{ConfigMap, Extractor};
use serde::Serialize;

/// A successfully processed node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedNode {
    pub node_name: String,
    pub configurations: ConfigMap,
    pub full_code: String,
}

impl ParsedNode {
    /// Extract the node's configuration and build its envelope.
    pub fn process(
        extractor: &Extractor,
        node_name: &str,
        node_code: &str,
    ) -> Result<Self, ExtractError> {
        let configurations = extractor.extract(node_code)?;
        Ok(Self {
            node_name: node_name.to_string(),
            configurations,
            full_code: node_code.trim().to_string(),
        })
    }

    /// File stem used for the node's module in a generated project.
    pub fn file_stem(&self) -> String {
        file_stem(&self.node_name)
    }
}

/// Lower-cased node name with spaces replaced by underscores; `"unnamed"`
/// when blank.
pub fn file_stem(node_name: &str) -> String {
    let trimmed = node_name.trim();
    if trimmed.is_empty() {
        return "unnamed".to_string();
    }
    trimmed.to_lowercase().replace(' ', "_")
}

/// Failure body for a node that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub node_name: String,
    pub error: String,
    pub code: ErrorCode,
}

impl ErrorEnvelope {
    pub fn new(node_name: &str, error: &ExtractError) -> Self {
        Self {
            node_name: node_name.to_string(),
            error: format!("Error processing node: {error}"),
            code: error.code(),
        }
    }
}

/// Result of processing one node, serialized as whichever envelope applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeOutcome {
    Parsed(ParsedNode),
    Failed(ErrorEnvelope),
}

impl NodeOutcome {
    pub fn process(extractor: &Extractor, node_name: &str, node_code: &str) -> Self {
        match ParsedNode::process(extractor, node_name, node_code) {
            Ok(node) => Self::Parsed(node),
            Err(e) => Self::Failed(ErrorEnvelope::new(node_name, &e)),
        }
    }

    pub fn node_name(&self) -> &str {
        match self {
            Self::Parsed(node) => &node.node_name,
            Self::Failed(envelope) => &envelope.node_name,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
