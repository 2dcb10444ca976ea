//! Python parsing for node fragments
//!
//! Wraps `rustpython_parser` and the offset-to-line bookkeeping the
//! extractor needs to report positions.

use crate::errors::ExtractError;
use rustpython_parser::ast;
use rustpython_parser::text_size::TextRange;
use std::borrow::Cow;

/// Parse a Python fragment into its module-level statements.
///
/// Blank input is rejected up front; the grammar would otherwise accept it
/// as an empty module.
pub fn parse_module(content: &str) -> Result<Vec<ast::Stmt>, ExtractError> {
    if content.trim().is_empty() {
        return Err(ExtractError::syntax("empty source fragment", None));
    }

    let module = rustpython_parser::parse(content, rustpython_parser::Mode::Module, "<fragment>")
        .map_err(|e| {
            let line = LineIndex::new(content).line_of(e.offset.to_usize());
            ExtractError::syntax(e.error.to_string(), Some(line))
        })?;

    match module {
        ast::Mod::Module(module) => Ok(module.body),
        _ => Ok(Vec::new()),
    }
}

/// Rewrite `\r\n` and lone `\r` line endings as `\n`.
pub fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Byte offsets of line starts, for turning AST offsets into line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(next) => next,
        }
    }

    pub fn start_line(&self, range: TextRange) -> usize {
        self.line_of(range.start().to_usize())
    }

    /// Last line touched by `range`; a trailing newline does not count.
    pub fn end_line(&self, range: TextRange) -> usize {
        let end = range.end().to_usize();
        self.line_of(end.saturating_sub(1).max(range.start().to_usize()))
    }
}

/// Source text covered by `range`.
pub fn range_text(source: &str, range: TextRange) -> &str {
    source
        .get(range.start().to_usize()..range.end().to_usize())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustpython_parser::ast::Ranged;

    #[test]
    fn test_parse_python() {
        let body = parse_module("class Config:\n    x = 1\n").unwrap();
        assert_eq!(body.len(), 1);
        assert!(matches!(body[0], ast::Stmt::ClassDef(_)));
    }

    #[test]
    fn test_empty_source_is_syntax_error() {
        assert!(matches!(
            parse_module(""),
            Err(ExtractError::Syntax { line: None, .. })
        ));
        assert!(matches!(
            parse_module("  \n\t\n"),
            Err(ExtractError::Syntax { .. })
        ));
    }

    #[test]
    fn test_invalid_source_reports_line() {
        let err = parse_module("a = 1\nb = (\nclass\n").unwrap_err();
        match err {
            ExtractError::Syntax { line, .. } => assert!(line.is_some_and(|l| l >= 2)),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_python2_syntax_is_rejected() {
        for source in ["print \"hi\"\n", "exec \"x = 1\"\n", "x = 1 <> 2\n", "a = `1`\n"] {
            assert!(
                matches!(parse_module(source), Err(ExtractError::Syntax { .. })),
                "{source:?} should not parse"
            );
        }
    }

    #[test]
    fn test_comment_only_source_parses() {
        assert!(parse_module("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_range_text_and_lines() {
        let source = "a = 1\nb = [\n    2,\n]\n";
        let body = parse_module(source).unwrap();
        let lines = LineIndex::new(source);
        assert_eq!(range_text(source, body[0].range()), "a = 1");
        assert_eq!(lines.start_line(body[1].range()), 2);
        assert_eq!(lines.end_line(body[1].range()), 4);
    }

    #[test]
    fn test_line_of_offsets() {
        let lines = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(lines.line_of(0), 1);
        assert_eq!(lines.line_of(2), 1);
        assert_eq!(lines.line_of(3), 2);
        assert_eq!(lines.line_of(6), 3);
        assert_eq!(lines.line_of(7), 4);
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }
}
