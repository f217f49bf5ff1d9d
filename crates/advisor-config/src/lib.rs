//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, HistorySettings, JudgeSettings, LoggingConfig, NewsSettings, QuoteSettings,
    StrategySettings, SymbolSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// Environment overrides use the `ADVISOR__` prefix with `__` separators,
/// e.g. `ADVISOR__JUDGE__MODEL=gemini-2.0-flash`.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder
        .add_source(
            Environment::with_prefix("ADVISOR")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
