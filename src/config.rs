use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::content::{ContentType, FormattingOptions};
use crate::error::Result;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub formatting: FormattingOptions,
    pub template: TemplateSettings,
}

/// Settings that shape metadata and labelling rather than toggling passes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplateSettings {
    pub content_type: ContentType,
    pub words_per_minute: u32,
    /// Word count above which validation suggests splitting the template.
    pub long_template_words: usize,
    /// Tag highlighted merge fields with `data-merge-field-type`.
    pub show_merge_field_types: bool,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            content_type: ContentType::Email,
            words_per_minute: 200,
            long_template_words: 500,
            show_merge_field_types: true,
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if it is missing or
    /// cannot be parsed.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unparsable config");
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    /// Load config from a TOML file, failing on I/O or parse errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
