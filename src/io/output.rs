use crate::config::OutputFormat;
use crate::extraction::Literal;
use crate::node::NodeOutcome;
use colored::*;
use std::io::Write;

pub trait OutputWriter {
    fn write_outcomes(&mut self, outcomes: &[NodeOutcome]) -> anyhow::Result<()>;
}

pub fn create_writer<'w>(
    format: OutputFormat,
    pretty: bool,
    writer: Box<dyn Write + 'w>,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer, pretty)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Writes a single envelope as an object, several as an array.
pub struct JsonWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_outcomes(&mut self, outcomes: &[NodeOutcome]) -> anyhow::Result<()> {
        let json = match (outcomes, self.pretty) {
            ([single], true) => serde_json::to_string_pretty(single)?,
            ([single], false) => serde_json::to_string(single)?,
            (many, true) => serde_json::to_string_pretty(many)?,
            (many, false) => serde_json::to_string(many)?,
        };
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_outcome(&mut self, outcome: &NodeOutcome) -> anyhow::Result<()> {
        match outcome {
            NodeOutcome::Parsed(node) => {
                writeln!(
                    self.writer,
                    "{} {} {}",
                    node.node_name.bold().blue(),
                    format!("[{}.py]", node.file_stem()).cyan(),
                    format!("({} settings)", node.configurations.len()).dimmed()
                )?;
                let width = node.configurations.keys().map(str::len).max().unwrap_or(0);
                for entry in &node.configurations {
                    let value = render_value(&entry.value);
                    writeln!(
                        self.writer,
                        "  {:<width$} = {}",
                        entry.name.green(),
                        value,
                        width = width
                    )?;
                    writeln!(self.writer, "  {:<width$}   {}", "", entry.description.dimmed())?;
                }
            }
            NodeOutcome::Failed(envelope) => {
                writeln!(
                    self.writer,
                    "{} {} [{}] {}",
                    envelope.node_name.bold().blue(),
                    "FAIL".red().bold(),
                    envelope.code,
                    envelope.error
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_outcomes(&mut self, outcomes: &[NodeOutcome]) -> anyhow::Result<()> {
        for (i, outcome) in outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(self.writer)?;
            }
            self.write_outcome(outcome)?;
        }
        Ok(())
    }
}

fn render_value(value: &Literal) -> String {
    const MAX_WIDTH: usize = 60;
    let repr = value.to_string();
    if repr.chars().count() > MAX_WIDTH {
        format!("{}...", repr.chars().take(MAX_WIDTH).collect::<String>())
    } else {
        repr
    }
}
