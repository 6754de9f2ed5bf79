//! For reading application configuration.

use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
}

/// Database configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    /// The database username.
    pub username: String,
    /// The database password.
    pub password: String,
    /// The database port.
    pub port: u16,
    /// The database name.
    pub database_name: String,
    /// The database host.
    pub host: String,
    /// The maximum size of the connection pool.
    pub max_connections: u32,
    /// How long to wait for a free connection before giving up.
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
    /// Retry policy for establishing connections.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Retry policy for establishing database connections.
///
/// Failed attempts are retried up to `max_retries` times, sleeping
/// `initial_delay` before the first retry and doubling the delay after
/// each attempt up to `max_delay`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// The maximum number of retries after a failed attempt.
    pub max_retries: u32,
    /// The delay before the first retry.
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,
    /// The upper bound on the delay between retries.
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// Retrieve [`Config`] from the default configuration file.
#[tracing::instrument]
pub fn load_config() -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("config"))
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?
        .try_deserialize()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_file_parses() {
        let config = load_config().unwrap();
        assert_eq!(100, config.database.max_connections);
        assert_eq!(Duration::from_secs(5), config.database.acquire_timeout);
    }

    #[test]
    fn retry_section_is_optional() {
        let database: DatabaseConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                username = "todo"
                password = "todo"
                port = 5432
                database_name = "todo"
                host = "localhost"
                max_connections = 10
                acquire_timeout = "1s"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(3, database.retry.max_retries);
        assert_eq!(Duration::from_millis(100), database.retry.initial_delay);
        assert_eq!(Duration::from_secs(5), database.retry.max_delay);
    }
}
