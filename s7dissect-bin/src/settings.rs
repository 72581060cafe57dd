use anyhow::Result;
use config::{Config, Environment, File};
use s7dissect_core::DecoderConfig;
use serde::Deserialize;
use std::path::Path;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE_NAME: &str = "s7dissect.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub decoder: DecoderConfig,
}

impl Settings {
    /// Layer the optional TOML file under `S7DISSECT__*` environment
    /// variables, e.g. `S7DISSECT__DECODER__MAX_LIST_ENTRIES=64`.
    pub fn new(config_path: &Path) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("S7DISSECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Ok(builder.build()?.try_deserialize()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    #[serde(default = "Log::level_default")]
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: Log::level_default(),
        }
    }
}

impl Log {
    fn level_default() -> String {
        "warn".into()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One JSON document per line
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Info line only
    Summary,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub format: Format,
}
