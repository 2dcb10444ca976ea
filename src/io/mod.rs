pub mod output;

pub use output::{create_writer, JsonWriter, OutputWriter, TerminalWriter};

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Path that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Read a fragment from a file, or from stdin for `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read source from stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
