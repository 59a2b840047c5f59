//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! Environment variables are mapped from `UNOBTRUSIVE_<SETTING_NAME>` format:
//!
//! | Env Var | Setting |
//! |---|---|
//! | `UNOBTRUSIVE_DEBUG` | `debug` |
//! | `UNOBTRUSIVE_LOG_LEVEL` | `log_level` |
//! | `UNOBTRUSIVE_LANGUAGE_CODE` | `language_code` |
//! | `UNOBTRUSIVE_TRANSLATION_DOMAIN` | `translation_domain` (`false` disables, empty selects the default; any other value names a domain) |
//! | `UNOBTRUSIVE_RANGE_MESSAGES` | `range_messages` |
//! | `UNOBTRUSIVE_EMPTY_BOUNDS` | `empty_bounds` |
//! | `UNOBTRUSIVE_INTERPOLATE_FALLBACK` | `interpolate_fallback` |
//! | `UNOBTRUSIVE_ATTRIBUTE_PREFIX` | `attribute_prefix` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use unobtrusive_core::settings_loader;
//!
//! // Load from TOML
//! let settings = settings_loader::from_toml_file("config/validation.toml").unwrap();
//!
//! // Load from JSON with environment overrides
//! let settings = settings_loader::from_json_file_with_env("config/validation.json").unwrap();
//! ```

use std::path::Path;

use crate::error::UnobtrusiveError;
use crate::i18n::TranslationDomain;
use crate::settings::{EmptyBoundPolicy, RangeMessageMode, Settings};

/// Prefix shared by every recognised environment variable.
pub const ENV_PREFIX: &str = "UNOBTRUSIVE_";

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, UnobtrusiveError> {
    // TOML is converted to JSON and merged over the serialized defaults so
    // partial files keep every unspecified default.
    let toml_value: toml::Value = toml::from_str(toml_str).map_err(|e| {
        UnobtrusiveError::ConfigurationError(format!("Failed to parse TOML: {e}"))
    })?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, UnobtrusiveError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, UnobtrusiveError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, UnobtrusiveError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
        UnobtrusiveError::ConfigurationError(format!("Failed to parse JSON: {e}"))
    })?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, UnobtrusiveError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, UnobtrusiveError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `UNOBTRUSIVE_*` environment variable overrides to a settings struct.
///
/// Values that fail to parse (e.g. an unknown range mode) are ignored and
/// logged at `warn` level.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_with(settings, |name| std::env::var(format!("{ENV_PREFIX}{name}")).ok());
}

/// Applies overrides using `lookup` to resolve each setting name
/// (e.g. `"LOG_LEVEL"`) to a raw value.
pub fn apply_overrides_with<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("DEBUG") {
        settings.debug = parse_flag(&val);
    }

    if let Some(val) = lookup("LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Some(val) = lookup("TRANSLATION_DOMAIN") {
        settings.translation_domain = TranslationDomain::parse(&val);
    }

    if let Some(val) = lookup("RANGE_MESSAGES") {
        match val.trim().to_lowercase().as_str() {
            "one_sided" => settings.range_messages = RangeMessageMode::OneSided,
            "combined_only" => settings.range_messages = RangeMessageMode::CombinedOnly,
            other => tracing::warn!(value = other, "ignoring unknown range message mode"),
        }
    }

    if let Some(val) = lookup("EMPTY_BOUNDS") {
        match val.trim().to_lowercase().as_str() {
            "loose" => settings.empty_bounds = EmptyBoundPolicy::Loose,
            "strict" => settings.empty_bounds = EmptyBoundPolicy::Strict,
            other => tracing::warn!(value = other, "ignoring unknown empty bound policy"),
        }
    }

    if let Some(val) = lookup("INTERPOLATE_FALLBACK") {
        settings.interpolate_fallback = parse_flag(&val);
    }

    if let Some(val) = lookup("ATTRIBUTE_PREFIX") {
        settings.attribute_prefix = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_flag(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, UnobtrusiveError> {
    std::fs::read_to_string(path).map_err(|e| {
        UnobtrusiveError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, UnobtrusiveError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        UnobtrusiveError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        UnobtrusiveError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
