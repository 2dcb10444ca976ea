use crate::config::{load_config, load_config_file, NodeconfConfig, OutputFormat};
use crate::extraction::Extractor;
use crate::io::{create_writer, read_source, STDIN_PATH};
use crate::node::NodeOutcome;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Options of the `extract` command; `None` falls back to the config file.
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    pub paths: Vec<PathBuf>,
    pub name: Option<String>,
    pub format: Option<OutputFormat>,
    pub block: Option<String>,
    pub max_bytes: Option<usize>,
    pub config: Option<PathBuf>,
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    AllSucceeded,
    /// At least one fragment was rejected
    SomeFailed,
}

/// A named fragment read from disk or stdin
#[derive(Debug, Clone)]
pub struct NodeInput {
    pub name: String,
    pub code: String,
}

pub fn handle_extract(options: ExtractConfig) -> Result<ExtractStatus> {
    let settings = resolve_settings(&options)?;
    let inputs = read_inputs(&options.paths, options.name.as_deref())?;
    let extractor = Extractor::with_config(&settings.extractor);

    let outcomes = process_inputs(&extractor, &inputs);
    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    tracing::info!(
        nodes = outcomes.len(),
        failed,
        block = extractor.block_name(),
        "extraction finished"
    );

    let stdout = std::io::stdout();
    let mut writer = create_writer(
        settings.output.format,
        settings.output.pretty,
        Box::new(stdout.lock()),
    );
    writer.write_outcomes(&outcomes)?;

    Ok(if failed == 0 {
        ExtractStatus::AllSucceeded
    } else {
        ExtractStatus::SomeFailed
    })
}

/// Merge file configuration with command-line overrides.
pub fn resolve_settings(options: &ExtractConfig) -> Result<NodeconfConfig> {
    let mut settings = match &options.config {
        Some(path) => load_config_file(path)?,
        None => load_config(),
    };

    if let Some(block) = &options.block {
        settings.extractor.block_name = block.clone();
    }
    if let Some(max_bytes) = options.max_bytes {
        settings.extractor.max_fragment_bytes = max_bytes;
    }
    if let Some(format) = options.format {
        settings.output.format = format;
    }
    if options.compact {
        settings.output.pretty = false;
    }

    settings.validate().context("Invalid command-line options")?;
    Ok(settings)
}

fn read_inputs(paths: &[PathBuf], name: Option<&str>) -> Result<Vec<NodeInput>> {
    let stdin_only = [PathBuf::from(STDIN_PATH)];
    let paths = if paths.is_empty() { &stdin_only[..] } else { paths };

    if name.is_some() && paths.len() > 1 {
        anyhow::bail!("--name can only be used with a single input");
    }

    paths
        .iter()
        .map(|path| {
            let code = read_source(path)?;
            let name = name.map_or_else(|| node_name_for(path), str::to_string);
            Ok(NodeInput { name, code })
        })
        .collect()
}

/// Node name derived from a path: its file stem, or `stdin`.
pub fn node_name_for(path: &Path) -> String {
    if path.as_os_str() == STDIN_PATH {
        return "stdin".to_string();
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run the extractor over every input in parallel, keeping input order.
pub fn process_inputs(extractor: &Extractor, inputs: &[NodeInput]) -> Vec<NodeOutcome> {
    inputs
        .par_iter()
        .map(|input| NodeOutcome::process(extractor, &input.name, &input.code))
        .collect()
}
