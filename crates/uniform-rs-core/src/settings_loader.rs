//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (deep-merged over the defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `UNIFORM_DEBUG` | `debug` |
//! | `UNIFORM_LOG_LEVEL` | `log_level` |
//! | `UNIFORM_LANGUAGE_CODE` | `language_code` |
//! | `UNIFORM_MESSAGES` | `messages` |
//! | `UNIFORM_PREVENT_SUBMIT` | `options.prevent_submit` |
//! | `UNIFORM_ASK_ON_LEAVE` | `options.ask_on_leave` |
//! | `UNIFORM_FIELD_SELECTOR` | `options.field_selector` |
//! | `UNIFORM_DEFAULT_VALUE_COLOR` | `options.default_value_color` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use uniform_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/uniform.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/uniform.json").unwrap();
//! ```

use std::path::Path;

use crate::error::UniformError;
use crate::settings::Settings;

/// Loads settings from a TOML string. Keys not present keep their defaults.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, UniformError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| UniformError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    from_overlay(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, UniformError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, UniformError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string. Keys not present keep their defaults.
pub fn from_json_str(json_str: &str) -> Result<Settings, UniformError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| UniformError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    from_overlay(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, UniformError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, UniformError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a file, choosing the format by extension
/// (`.json` is JSON, anything else is TOML).
pub fn from_file(path: impl AsRef<Path>) -> Result<Settings, UniformError> {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        from_json_file(path)
    } else {
        from_toml_file(path)
    }
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `UNIFORM_*` environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes" (case-insensitive) as true and
/// treat anything else as false.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("UNIFORM_DEBUG") {
        settings.debug = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("UNIFORM_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("UNIFORM_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Ok(val) = std::env::var("UNIFORM_MESSAGES") {
        settings.messages = Some(val.into());
    }

    if let Ok(val) = std::env::var("UNIFORM_PREVENT_SUBMIT") {
        settings.options.prevent_submit = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("UNIFORM_ASK_ON_LEAVE") {
        settings.options.ask_on_leave = parse_flag(&val);
    }

    if let Ok(val) = std::env::var("UNIFORM_FIELD_SELECTOR") {
        settings.options.field_selector = val;
    }

    if let Ok(val) = std::env::var("UNIFORM_DEFAULT_VALUE_COLOR") {
        settings.options.default_value_color = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_flag(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, UniformError> {
    std::fs::read_to_string(path).map_err(|e| {
        UniformError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

/// Deep-merges a parsed document over the default settings and deserializes it.
fn from_overlay(overlay: serde_json::Value, format: &str) -> Result<Settings, UniformError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        UniformError::SerializationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, overlay);
    serde_json::from_value(merged).map_err(|e| {
        UniformError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
pub(crate) fn toml_to_json(value: toml::Value) -> serde_json::Value {
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
