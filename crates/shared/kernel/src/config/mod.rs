use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file stem, resolved against the working directory.
/// The extension (`.toml`, `.json`, `.yaml`, ...) is discovered by the loader.
pub const DEFAULT_CONFIG_FILE: &str = "nf-site";

/// Prefix of environment overrides, e.g. `NF__CONTENT__BASE_URL`.
pub const ENV_PREFIX: &str = "NF";

/// Custom error type for config loading.
#[nf_derive::nf_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file with environment overrides on top.
///
/// Layers, lowest priority first:
/// 1. **File**: the explicit `path` (must exist), or the optional
///    [`DEFAULT_CONFIG_FILE`] in the working directory.
/// 2. **Environment**: variables prefixed with `NF__`; nested keys are separated by
///    double underscores (`NF__CONTENT__BASE_URL` maps to `content.base_url`).
///
/// Missing keys take the `Default` of `T`'s fields when `T` is `#[serde(default)]`.
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found or parsed.
/// * The merged values do not match the structure of `T`.
///
/// # Example
/// ```rust,no_run
/// use nf_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_with_env(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .convert_case(config::Case::Snake)
}

fn load_with_env<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(env);

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
