use axum::http::HeaderValue;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8001;
const DEFAULT_EVENTS_CSV_PATH: &str = "uploads/events.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment at start-up
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin; any origin is allowed when unset
    pub frontend_origin: Option<HeaderValue>,
    /// Server-side CSV read by the event import endpoint
    pub events_csv_path: PathBuf,
    /// Confirmation token for the bulk event commands, which are disabled without it
    pub admin_token: Option<String>,
    pub dropbox_access_token: Option<String>,
}

impl Config {
    /// Reads the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match var("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let frontend_origin = var("FRONTEND_URL")
            .map(|value| {
                HeaderValue::from_str(&value).map_err(|_| ConfigError::Invalid {
                    name: "FRONTEND_URL",
                    value,
                })
            })
            .transpose()?;

        Ok(Self {
            database_url,
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            frontend_origin,
            events_csv_path: var("EVENTS_CSV_PATH")
                .unwrap_or_else(|| DEFAULT_EVENTS_CSV_PATH.to_owned())
                .into(),
            admin_token: var("ADMIN_TOKEN"),
            dropbox_access_token: var("DROPBOX_ACCESS_TOKEN"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/hub")]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8001");
        assert_eq!(config.events_csv_path, PathBuf::from("uploads/events.csv"));
        assert!(config.frontend_origin.is_none());
        assert!(config.admin_token.is_none());
        assert!(config.dropbox_access_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/hub"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("FRONTEND_URL", "https://hub.example.edu"),
            ("ADMIN_TOKEN", "s3cret"),
            ("DROPBOX_ACCESS_TOKEN", "  "),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(
            config.frontend_origin,
            Some(HeaderValue::from_static("https://hub.example.edu"))
        );
        assert_eq!(config.admin_token.as_deref(), Some("s3cret"));
        assert!(config.dropbox_access_token.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
        assert!(matches!(
            config_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }
}
