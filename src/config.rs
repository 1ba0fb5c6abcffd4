//! Application configuration loaded from environment variables.
//!
//! Every variable has a documented default so the service starts against
//! a local development database with no configuration at all.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Position-report store host (`AISDB_REST_DBHOST`)
    pub db_host: String,
    /// Position-report store port (`AISDB_REST_DBPORT`)
    pub db_port: u16,
    /// Position-report store user (`AISDB_REST_DBUSER`)
    pub db_user: String,
    /// Position-report store password (`AISDB_REST_DBPASSWORD`)
    pub db_password: String,
    /// Server port (`PORT`)
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            db_host: env::var("AISDB_REST_DBHOST").unwrap_or_else(|_| "fc00::17".to_string()),
            db_port: parse_port("AISDB_REST_DBPORT", 5431)?,
            db_user: env::var("AISDB_REST_DBUSER").unwrap_or_else(|_| "postgres".to_string()),
            db_password: env::var("AISDB_REST_DBPASSWORD")
                .unwrap_or_else(|_| "devel".to_string()),
            port: parse_port("PORT", 8000)?,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_port: 5431,
            db_user: "postgres".to_string(),
            db_password: "devel".to_string(),
            port: 8000,
        }
    }
}

fn parse_port(name: &'static str, default: u16) -> Result<u16, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because the cases mutate shared process environment.
    #[test]
    fn test_config_from_env() {
        env::remove_var("AISDB_REST_DBHOST");
        env::remove_var("AISDB_REST_DBPORT");
        env::remove_var("AISDB_REST_DBUSER");
        env::remove_var("AISDB_REST_DBPASSWORD");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.db_host, "fc00::17");
        assert_eq!(config.db_port, 5431);
        assert_eq!(config.db_user, "postgres");
        assert_eq!(config.db_password, "devel");
        assert_eq!(config.port, 8000);

        env::set_var("AISDB_REST_DBPORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "AISDB_REST_DBPORT",
                ..
            }
        ));
        env::remove_var("AISDB_REST_DBPORT");
    }
}
