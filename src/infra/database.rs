//! For interacting with the database.

use super::config::{DatabaseConfig, RetryConfig};
use sqlx::{
    pool::PoolOptions,
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions, PgPool, Postgres, Transaction,
};
use std::future::Future;
use tracing::log::LevelFilter;

/// A common transaction type.
/// Use this for the business and persistence layer.
pub type Tx = Transaction<'static, Postgres>;

/// A common database pool type.
pub type DbPool = PgPool;

/// Creates a connection pool based on some configuration.
///
/// The pool connects lazily, so the service comes up even while the
/// database is unreachable; requests then surface the failure instead.
pub fn init_db(config: &DatabaseConfig) -> DbPool {
    let db_options = PgConnectOptions::new()
        .username(&config.username)
        .password(&config.password)
        .host(&config.host)
        .port(config.port)
        .database(&config.database_name)
        .ssl_mode(PgSslMode::Prefer)
        .log_statements(LevelFilter::Debug);
    let db: DbPool = PoolOptions::default()
        .acquire_timeout(config.acquire_timeout)
        .min_connections(1)
        .max_connections(config.max_connections)
        .connect_lazy_with(db_options);
    db
}

/// Begins a transaction, retrying transient connection failures with a
/// capped backoff before reporting the error.
///
/// Only establishment is retried; statement failures inside a running
/// transaction propagate immediately.
pub async fn begin_with_retry(db: &DbPool, retry: &RetryConfig) -> Result<Tx, sqlx::Error> {
    retry_with_backoff(|| db.begin(), retry).await
}

/// Retries an async operation with capped exponential backoff.
///
/// The operation runs at most `max_retries + 1` times. The delay starts
/// at `initial_delay` and doubles after every failed attempt, never
/// exceeding `max_delay`.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, retry: &RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = retry.initial_delay;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!("Succeeded after {} retries", attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt < retry.max_retries => {
                attempt += 1;
                tracing::warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt,
                    retry.max_retries,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(retry.max_delay);
            }
            Err(e) => return Err(e),
        }
    }
}
