// --- File: crates/trainpay_config/src/lib.rs ---
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use thiserror::Error;
use tracing::warn;

pub mod env_vars;
pub mod models;

pub use models::*;

use env_vars::{get_config_prefix, legacy_overrides, CONFIG_SEPARATOR};

/// Errors raised while assembling the startup configuration.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// A configuration source could not be read or deserialized
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// Required secrets are absent; every missing key is listed
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// A value is present but unusable
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads and validates the application configuration.
///
/// Sources, lowest precedence first: `config/default.*`, `config/{RUN_ENV}.*`,
/// `TRAINPAY__SECTION__KEY` variables, then the flat variables listed in
/// [`env_vars::LEGACY_ENV_VARS`]. A `.env` file is read once beforehand.
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("TRAINPAY_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let mut builder = Config::builder()
        .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
        .add_source(File::with_name(&format!("{config_dir}/{run_env}")).required(false))
        .add_source(Environment::with_prefix(&get_config_prefix()).separator(CONFIG_SEPARATOR));

    for (key, value) in legacy_overrides(|name| env::var(name).ok()) {
        builder = builder.set_override(key, value)?;
    }

    from_builder(builder)
}

/// Builds and validates a configuration from an already assembled builder.
pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigLoadError> {
    let raw: RawConfig = builder.build()?.try_deserialize()?;
    raw.validate()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, at most once.
///
/// `DOTENV_OVERRIDE` names the file; otherwise `.env` in the working directory.
/// A missing file is not an error.
pub fn ensure_dotenv_loaded() {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        if let Err(e) = dotenv::from_filename(&dotenv_path) {
            if !e.not_found() {
                warn!("Could not read {}: {}", dotenv_path, e);
            }
        }
    });
}
