//! Environment variable naming for the Trainpay backend.
//!
//! Two naming schemes are accepted. Structured variables follow the
//! `TRAINPAY__SECTION__KEY` pattern and map onto every configuration key.
//! The flat names used by the original deployment (`OMISE_SECRET_KEY`,
//! `FIREBASE_BUCKET`, `PORT`, ...) are still honoured and take precedence.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "TRAINPAY";

/// The separator between prefix, section and key
pub const CONFIG_SEPARATOR: &str = "__";

/// Flat environment variables and the configuration key each one sets.
pub const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("OMISE_PUBLIC_KEY", "omise.public_key"),
    ("OMISE_SECRET_KEY", "omise.secret_key"),
    ("FIREBASE_SERVICE_ACCOUNT", "firebase.service_account_path"),
    ("FIREBASE_BUCKET", "firebase.bucket"),
    ("FIREBASE_STORAGE_EMULATOR_HOST", "firebase.emulator_host"),
    ("PORT", "server.port"),
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to its structured environment variable name.
///
/// `"omise.secret_key"` becomes `"TRAINPAY__OMISE__SECRET_KEY"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// The flat variable that sets `path`, if there is one.
pub fn legacy_env_var_for(path: &str) -> Option<&'static str> {
    LEGACY_ENV_VARS
        .iter()
        .find(|(_, key)| *key == path)
        .map(|(name, _)| *name)
}

/// Resolve the flat variables into `(config key, value)` overrides.
///
/// `lookup` is usually `|name| std::env::var(name).ok()`; blank values are skipped.
pub fn legacy_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    LEGACY_ENV_VARS
        .iter()
        .filter_map(|(name, key)| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, value))
        })
        .collect()
}
