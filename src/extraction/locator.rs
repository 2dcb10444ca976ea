//! Locating the declaration block in a parsed fragment.

use crate::errors::ExtractError;
use crate::parser::LineIndex;
use rustpython_parser::ast::{self, Stmt};

/// A top-level class definition found by name.
#[derive(Debug, Clone)]
pub struct DeclarationBlock<'a> {
    /// Statements of the class body, in source order
    pub body: &'a [Stmt],
    /// 1-based line of the class statement
    pub start_line: usize,
    /// 1-based last line of the class body
    pub end_line: usize,
}

/// Find the first top-level class named `name`.
///
/// Only module-level statements are examined. A decorated class counts; a
/// class nested in another class or a function, or a variable or function
/// with the same name, does not.
pub fn locate_block<'a>(
    module: &'a [Stmt],
    lines: &LineIndex,
    name: &str,
) -> Result<DeclarationBlock<'a>, ExtractError> {
    module
        .iter()
        .find_map(|stmt| match stmt {
            Stmt::ClassDef(class_def) if class_def.name.as_str() == name => Some(class_def),
            _ => None,
        })
        .map(|class_def: &ast::StmtClassDef| DeclarationBlock {
            body: &class_def.body,
            start_line: lines.start_line(class_def.range),
            end_line: lines.end_line(class_def.range),
        })
        .ok_or_else(|| ExtractError::not_found(name))
}
