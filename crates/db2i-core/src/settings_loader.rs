//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `DB2I_NAME` | `name` |
//! | `DB2I_DATABASE` | `database` |
//! | `DB2I_HOST` | `host` |
//! | `DB2I_PORT` | `port` |
//! | `DB2I_USER` | `user` |
//! | `DB2I_PASSWORD` | `password` |
//! | `DB2I_LOG_LEVEL` | `log_level` |
//! | `DB2I_DEBUG` | `debug` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use db2i_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/db2i.toml").unwrap();
//! settings.validate().unwrap();
//! ```

use std::path::Path;

use crate::error::AdapterError;
use crate::settings::AdapterSettings;

/// Loads settings from a TOML string.
///
/// Keys not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<AdapterSettings, AdapterError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| AdapterError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<AdapterSettings, AdapterError> {
    let content = read_file(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<AdapterSettings, AdapterError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<AdapterSettings, AdapterError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| AdapterError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<AdapterSettings, AdapterError> {
    let content = read_file(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> AdapterSettings {
    let mut settings = AdapterSettings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `DB2I_*` environment variable overrides to a settings struct.
///
/// `DB2I_DEBUG` accepts "true"/"1"/"yes"; anything else means false. An
/// unparsable `DB2I_PORT` is ignored.
pub fn apply_env_overrides(settings: &mut AdapterSettings) {
    if let Ok(val) = std::env::var("DB2I_NAME") {
        settings.name = val;
    }

    if let Ok(val) = std::env::var("DB2I_DATABASE") {
        settings.database = val;
    }

    if let Ok(val) = std::env::var("DB2I_HOST") {
        settings.host = Some(val).filter(|h| !h.trim().is_empty());
    }

    if let Ok(val) = std::env::var("DB2I_PORT") {
        if let Ok(port) = val.trim().parse::<u16>() {
            settings.port = Some(port);
        }
    }

    if let Ok(val) = std::env::var("DB2I_USER") {
        settings.user = val;
    }

    if let Ok(val) = std::env::var("DB2I_PASSWORD") {
        settings.password = val;
    }

    if let Ok(val) = std::env::var("DB2I_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("DB2I_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_file(path: &Path, format: &str) -> Result<String, AdapterError> {
    std::fs::read_to_string(path).map_err(|e| {
        AdapterError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<AdapterSettings, AdapterError> {
    let default_json = serde_json::to_value(AdapterSettings::default()).map_err(|e| {
        AdapterError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        AdapterError::ConfigurationError(format!(
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

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            name = "appdata"
            database = "PROD"
            user = "migrator"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.name, "appdata");
        assert_eq!(settings.database, "PROD");
        assert_eq!(settings.user, "migrator");
        // Defaults preserved
        assert_eq!(settings.log_level, "info");
        assert!(settings.host.is_none());
    }

    #[test]
    fn test_from_toml_str_host_and_port() {
        let toml = r#"
            name = "appdata"
            database = "PROD"
            host = "ibmi.example.com"
            port = 446
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.host.as_deref(), Some("ibmi.example.com"));
        assert_eq!(settings.port, Some(446));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, AdapterSettings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(AdapterError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("port = \"not-a-number\"");
        assert!(matches!(result, Err(AdapterError::ConfigurationError(_))));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "name": "appdata",
            "database": "PROD",
            "debug": true,
            "log_level": "debug"
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.name, "appdata");
        assert!(settings.debug);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/db2i.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_override_wins() {
        let base = serde_json::json!({"a": 1, "b": {"c": 2, "d": 3}});
        let over = serde_json::json!({"b": {"c": 20}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": 1, "b": {"c": 20, "d": 3}}));
    }

    #[test]
    fn test_toml_to_json_nested() {
        let value: toml::Value = toml::from_str("x = [1, 2]\n[t]\ny = true").unwrap();
        let json = toml_to_json(value);
        assert_eq!(json["x"], serde_json::json!([1, 2]));
        assert_eq!(json["t"]["y"], serde_json::json!(true));
    }
}
