use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# nodeconf configuration

[extractor]
# Top-level class whose assignments are extracted
block_name = "Config"
# Fragments above this size are rejected before parsing
max_fragment_bytes = 1048576

[output]
# json or terminal
format = "json"
pretty = true
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_file, NodeconfConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_defaults() {
        let temp = TempDir::new().unwrap();
        init_config_in(temp.path(), false).unwrap();
        let loaded = load_config_file(&temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(loaded, NodeconfConfig::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        init_config_in(temp.path(), false).unwrap();
        assert!(init_config_in(temp.path(), false).is_err());
        assert!(init_config_in(temp.path(), true).is_ok());
    }
}
