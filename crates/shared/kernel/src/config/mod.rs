use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Environment prefix for overrides, e.g. `DBM__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "DBM";

/// Custom error type for config loading.
#[dbm_derive::dbm_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from an optional file plus environment overrides.
///
/// 1. **File**: when `path` is given, the file must exist; its format is picked from
///    the extension (`.toml`, `.json`, `.yaml`, ...).
/// 2. **Environment**: variables prefixed with `DBM__` override file values. Nested keys
///    use double underscores (`DBM__LOGGING__JSON=true` maps to `logging.json`).
///
/// Fields missing from both sources fall back to the target type's serde defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or malformed, or if the merged
/// values do not match `T`.
///
/// # Example
/// ```rust
/// use dbm_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct ToolConfig {
///     verbose: bool,
/// }
///
/// let cfg: ToolConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = &path {
        let path: &Path = path.as_ref();
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
