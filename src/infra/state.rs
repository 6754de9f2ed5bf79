//! Global application state.
//!
//! Used for access to common resources such as the database pool.

use super::{
    config::RetryConfig,
    database::{self, DbPool, Tx},
    error::ApiResult,
};
use axum::extract::FromRef;

/// Global application state.
#[derive(Clone, Debug, FromRef)]
pub struct AppState {
    db: DbPool,
    retry: RetryConfig,
}

impl AppState {
    /// Constructs a new [`AppState`].
    pub fn new(db: DbPool, retry: RetryConfig) -> Self {
        Self { db, retry }
    }

    /// Returns the database pool.
    pub fn db(&self) -> &DbPool {
        &self.db
    }

    /// Begins a new database transaction.
    ///
    /// Establishing the connection is retried with backoff before the
    /// request is failed. Once handed out, the transaction is not
    /// retried; statements that fail surface their error as-is.
    pub async fn begin_tx(&self) -> ApiResult<Tx> {
        let tx = database::begin_with_retry(&self.db, &self.retry).await?;
        Ok(tx)
    }
}
