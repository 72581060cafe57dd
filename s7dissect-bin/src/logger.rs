use anyhow::{Context, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, Layer, Registry};

pub struct Logger {
    level: Level,
}

impl Logger {
    pub fn new(level: Option<Level>) -> Self {
        Logger {
            level: level.unwrap_or(Level::WARN),
        }
    }

    /// Parse a level name such as `debug`; unknown names fall back to WARN.
    pub fn from_name(name: &str) -> Self {
        Self::new(Level::from_str(name).ok())
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Install the global subscriber. Log lines go to stderr so stdout only
    /// carries decoded PDUs.
    pub fn initialize(&self) -> Result<()> {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(LevelFilter::from_level(self.level()));
        let subscriber = Registry::default().with(console_layer);
        tracing::subscriber::set_global_default(subscriber)
            .context("failed to install the tracing subscriber")
    }
}
