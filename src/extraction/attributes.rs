//! Attribute extraction from a declaration block body.

use super::comments::{DescriptionSource, NO_DESCRIPTION};
use super::literal::evaluate;
use super::locator::DeclarationBlock;
use super::types::{AttributeEntry, ConfigMap};
use crate::errors::ExtractError;
use crate::parser::LineIndex;
use rustpython_parser::ast::{Expr, Ranged, Stmt};
use tracing::{debug, trace, warn};

/// A simple `name = value` statement in the block body.
struct SimpleAssignment<'a> {
    name: &'a str,
    value: &'a Expr,
    line: usize,
}

/// Build the [`ConfigMap`] for a block.
///
/// Only assignments whose first target is a plain name take part; every
/// other statement is skipped. The first value that is not a literal aborts
/// the whole extraction.
pub fn extract_attributes(
    block: &DeclarationBlock<'_>,
    source: &str,
    lines: &LineIndex,
    descriptions: &impl DescriptionSource,
) -> Result<ConfigMap, ExtractError> {
    let mut config = ConfigMap::new();

    for statement in block.body {
        let Some(assignment) = simple_assignment(statement, lines) else {
            trace!(line = lines.start_line(statement.range()), "skipping statement");
            continue;
        };

        let value = evaluate(assignment.value, source).map_err(|message| {
            warn!(attribute = assignment.name, line = assignment.line, %message, "rejected non-literal value");
            ExtractError::literal(assignment.name, message)
        })?;

        let description = descriptions
            .describe(assignment.line)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        debug!(attribute = assignment.name, line = assignment.line, "extracted attribute");
        config.insert(AttributeEntry {
            name: assignment.name.to_string(),
            value,
            description,
            line: assignment.line,
        });
    }

    Ok(config)
}

/// Recognize an assignment whose first target is a name. Chained
/// `a = b = expr` is keyed by `a`; annotated and augmented assignments are
/// not simple.
fn simple_assignment<'a>(statement: &'a Stmt, lines: &LineIndex) -> Option<SimpleAssignment<'a>> {
    let Stmt::Assign(assign) = statement else {
        return None;
    };
    let Some(Expr::Name(target)) = assign.targets.first() else {
        return None;
    };

    Some(SimpleAssignment {
        name: target.id.as_str(),
        value: &assign.value,
        line: lines.start_line(assign.range),
    })
}
