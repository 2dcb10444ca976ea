//! CLI command implementations.
//!
//! - **extract**: Extract the configuration class from node fragments
//! - **init**: Write a default configuration file

pub mod extract;
pub mod init;

pub use extract::{handle_extract, ExtractConfig, ExtractStatus};
pub use init::init_config;
