//! Adapter settings.
//!
//! [`AdapterSettings`] holds the options the adapter needs to address a DB2
//! for i system: the schema (library) it manages and the connection options
//! handed to the driver. Use [`settings_loader`](crate::settings_loader) to
//! read them from TOML, JSON, or the environment.

use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, AdapterResult};

/// Configuration for a single adapter instance.
///
/// # Examples
///
/// ```
/// use db2i_core::settings::AdapterSettings;
///
/// let settings = AdapterSettings {
///     name: "appdata".to_string(),
///     database: "*LOCAL".to_string(),
///     ..AdapterSettings::default()
/// };
/// assert_eq!(settings.schema_name(), "APPDATA");
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterSettings {
    /// The schema (library) all DDL is issued against.
    pub name: String,
    /// The database name, or the catalogued entry when no host is given.
    pub database: String,
    /// The database host for TCP/IP connections.
    pub host: Option<String>,
    /// The database port. Required when `host` is set.
    pub port: Option<u16>,
    /// The user to connect as.
    pub user: String,
    /// The password for `user`.
    pub password: String,
    /// Tracing filter directive (e.g. "info", "db2i=debug").
    pub log_level: String,
    /// Pretty, human-readable log output instead of JSON.
    pub debug: bool,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            database: String::new(),
            host: None,
            port: None,
            user: String::new(),
            password: String::new(),
            log_level: "info".to_string(),
            debug: false,
        }
    }
}

impl AdapterSettings {
    /// Returns the managed schema name, upper-cased.
    pub fn schema_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// Checks that the required options are present and consistent.
    pub fn validate(&self) -> AdapterResult<()> {
        if self.name.trim().is_empty() {
            return Err(AdapterError::ConfigurationError(
                "Configuration options must have a key for 'name' (the schema to manage)".into(),
            ));
        }
        if self.database.trim().is_empty() {
            return Err(AdapterError::ConfigurationError(
                "Configuration options must have a key for 'database'".into(),
            ));
        }
        if self.host.is_some() && self.port.is_none() {
            return Err(AdapterError::ConfigurationError(
                "Configuration options must have a key for 'port' when 'host' is specified".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AdapterSettings {
        AdapterSettings {
            name: "appdata".into(),
            database: "PROD".into(),
            ..AdapterSettings::default()
        }
    }

    #[test]
    fn test_defaults() {
        let s = AdapterSettings::default();
        assert_eq!(s.log_level, "info");
        assert!(!s.debug);
        assert!(s.host.is_none());
    }

    #[test]
    fn test_schema_name_upper_cased() {
        assert_eq!(valid().schema_name(), "APPDATA");
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_name() {
        let s = AdapterSettings { name: String::new(), ..valid() };
        assert!(matches!(s.validate(), Err(AdapterError::ConfigurationError(_))));
    }

    #[test]
    fn test_validate_missing_database() {
        let s = AdapterSettings { database: " ".into(), ..valid() };
        assert!(matches!(s.validate(), Err(AdapterError::ConfigurationError(_))));
    }

    #[test]
    fn test_validate_host_without_port() {
        let s = AdapterSettings { host: Some("ibmi.example.com".into()), ..valid() };
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("'port'"));
    }

    #[test]
    fn test_validate_host_with_port() {
        let s = AdapterSettings {
            host: Some("ibmi.example.com".into()),
            port: Some(446),
            ..valid()
        };
        assert!(s.validate().is_ok());
    }
}
