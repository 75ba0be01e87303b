use serde::Deserialize;

/// Top-level client configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub logging: LoggingConfig,
}

/// Console logging knobs; `RUST_LOG` still takes precedence when `filter` is unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Emit one JSON object per event instead of the compact text format.
    pub json: bool,
    /// Module-directed filter, e.g. `dbm_kernel=debug,dbm_domain=trace`.
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), json: false, filter: None }
    }
}
