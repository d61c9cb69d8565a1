pub mod scan;
pub mod vocabulary;

use anyhow::Context;
use std::path::Path;

use larder_core::LarderConfig;

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LarderConfig> {
    match path {
        Some(path) => LarderConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(LarderConfig::default()),
    }
}
