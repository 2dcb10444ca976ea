//! Attribute descriptions from adjacent comments.
//!
//! The association is textual, not syntactic: the description of an
//! attribute is the `#` comment found on the physical line directly below
//! the line its assignment starts on. A blank line, a multi-line value or a
//! trailing comment on the next statement all shift the association; this is
//! the established behavior and is kept as is.

/// Description used when no comment can be attached.
pub const NO_DESCRIPTION: &str = "No description available";

/// Strategy for attaching descriptions to attributes.
pub trait DescriptionSource {
    /// Description for an assignment starting on `line` (1-based).
    fn describe(&self, line: usize) -> Option<String>;
}

/// Reads the comment on the line immediately after the assignment.
#[derive(Debug, Clone)]
pub struct NextLineComment<'a> {
    lines: Vec<&'a str>,
}

impl<'a> NextLineComment<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }
}

impl DescriptionSource for NextLineComment<'_> {
    fn describe(&self, line: usize) -> Option<String> {
        description_after(&self.lines, line)
    }
}

/// The comment text on the line after `line` (1-based), if any.
///
/// Everything after the first `#` of the next line is taken, trimmed. The
/// marker is not checked against string literals, so a `#` inside a quoted
/// value on that line also counts.
pub fn description_after(lines: &[&str], line: usize) -> Option<String> {
    let next = lines.get(line)?.trim();
    let (_, comment) = next.split_once('#')?;
    let comment = comment.trim();
    (!comment.is_empty()).then(|| comment.to_string())
}
