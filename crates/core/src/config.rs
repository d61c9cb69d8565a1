use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::vocabulary::Vocabulary;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    Serialize(String),
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}

/// Top-level settings, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LarderConfig {
    pub ocr: OcrSettings,
    /// Optional TOML file replacing the builtin keyword tables.
    pub vocabulary: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Tesseract language code.
    pub language: String,
    pub tessdata_path: Option<String>,
    /// Longest image side handed to the recognizer, in pixels.
    pub max_dimension: u32,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            tessdata_path: None,
            max_dimension: 2800,
        }
    }
}

impl LarderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file. A relative `vocabulary` path is resolved against the
    /// directory containing the config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        if let (Some(vocab), Some(dir)) = (config.vocabulary.as_mut(), path.parent()) {
            if vocab.is_relative() {
                *vocab = dir.join(&*vocab);
            }
        }
        Ok(config)
    }

    /// The configured vocabulary, or the builtin tables when none is set.
    pub fn load_vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        match &self.vocabulary {
            Some(path) => Vocabulary::from_toml(&std::fs::read_to_string(path)?),
            None => Ok(Vocabulary::builtin().clone()),
        }
    }
}
