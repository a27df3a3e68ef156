use deadpool_postgres::{Config as PgConfig, Pool};
use tokio_postgres::NoTls;

use crate::error::{ParallelFailure, PgAdapterError};
use crate::executor::{run_parallel, run_statement, run_transaction};
use crate::query::{IntoQueryBatch, QueryAndParams};
use crate::results::ResultSet;
use crate::types::RowValues;

/// Async adapter over a PostgreSQL connection pool.
///
/// The pool is owned here and passed down explicitly; there is no ambient
/// or process-global pool anywhere in this crate. Construct one adapter at
/// startup, hand clones of it (or references) to whoever needs database
/// access, and [`close`](Self::close) it once at shutdown.
///
/// ```rust,no_run
/// use pg_adapter::prelude::*;
///
/// # async fn demo() -> Result<(), PgAdapterError> {
/// let mut cfg = deadpool_postgres::Config::new();
/// cfg.dbname = Some("planner".into());
/// cfg.host = Some("localhost".into());
/// cfg.port = Some(5432);
/// cfg.user = Some("app".into());
/// cfg.password = Some("secret".into());
///
/// let db = PgAdapter::new(cfg)?;
/// let result = db.query("SELECT COUNT(*) FROM tasks").await?;
/// # let _ = result;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct PgAdapter {
    pool: Pool,
}

impl PgAdapter {
    /// Build an adapter from a validated config.
    ///
    /// # Errors
    /// Returns `PgAdapterError::ConfigError` if a required field is missing
    /// or `PgAdapterError::ConnectionError` if pool creation fails.
    pub fn new(config: PgConfig) -> Result<Self, PgAdapterError> {
        if config.dbname.is_none() {
            return Err(PgAdapterError::ConfigError("dbname is required".to_string()));
        }
        if config.host.is_none() {
            return Err(PgAdapterError::ConfigError("host is required".to_string()));
        }
        if config.port.is_none() {
            return Err(PgAdapterError::ConfigError("port is required".to_string()));
        }
        if config.user.is_none() {
            return Err(PgAdapterError::ConfigError("user is required".to_string()));
        }
        if config.password.is_none() {
            return Err(PgAdapterError::ConfigError(
                "password is required".to_string(),
            ));
        }

        let pool = config
            .create_pool(Some(deadpool_postgres::Runtime::Tokio1), NoTls)
            .map_err(|e| {
                PgAdapterError::ConnectionError(format!("Failed to create Postgres pool: {e}"))
            })?;

        tracing::debug!(dbname = ?config.dbname, host = ?config.host, "postgres pool created");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// The underlying pool, exposed mainly for tests and pool tuning.
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Run a single query on a pool-managed lease.
    ///
    /// Accepts a plain SQL string, a [`QueryAndParams`], or the output of
    /// the [`sql!`](crate::sql) macro.
    ///
    /// # Errors
    /// Returns the pool error if no connection can be leased, or the
    /// database error if the statement fails.
    pub async fn query(
        &self,
        query: impl Into<QueryAndParams>,
    ) -> Result<ResultSet, PgAdapterError> {
        let query = query.into();
        let conn = self.pool.get().await?;
        run_statement(&conn, &query).await
    }

    /// Run a single query given as separate text and parameters.
    ///
    /// Same semantics as [`query`](Self::query), for callers that already
    /// hold the text and the parameter list apart.
    ///
    /// # Errors
    /// Returns the pool error if no connection can be leased, or the
    /// database error if the statement fails.
    pub async fn query_with(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, PgAdapterError> {
        self.query(QueryAndParams::new(query, params.to_vec()))
            .await
    }

    /// Run a batch of independent queries concurrently.
    ///
    /// Results come back ordered by submission index regardless of
    /// completion order. Database-tier parallelism is bounded by pool size.
    ///
    /// Not safe for queries with interdependent side effects, since nothing
    /// orders them relative to each other. Use [`transact`](Self::transact)
    /// for that.
    ///
    /// # Errors
    /// On the first query failure, returns a [`ParallelFailure`] carrying
    /// the error plus slot-aligned partial results (length of the batch,
    /// `None` where nothing completed). Queries already in flight keep
    /// running detached; their results are discarded.
    pub async fn parallel(
        &self,
        queries: impl IntoQueryBatch,
    ) -> Result<Vec<ResultSet>, ParallelFailure> {
        let queries = queries.into_queries();
        tracing::debug!(count = queries.len(), "dispatching parallel batch");
        run_parallel(&self.pool, queries).await
    }

    /// Run a batch of queries in order as one transaction.
    ///
    /// Wrapped in BEGIN/COMMIT on a single leased connection; each
    /// statement starts only after the previous one resolved. All-or-
    /// nothing: on any failure the transaction is rolled back and only the
    /// error is reported, never partial results.
    ///
    /// # Errors
    /// The first error encountered (acquisition, BEGIN, statement, or
    /// COMMIT); a ROLLBACK failure supersedes it, with the original error
    /// retained as the source.
    pub async fn transact(
        &self,
        queries: impl IntoQueryBatch,
    ) -> Result<Vec<ResultSet>, PgAdapterError> {
        let queries = queries.into_queries();
        tracing::debug!(count = queries.len(), "dispatching transaction");
        run_transaction(&self.pool, queries).await
    }

    /// Shut the pool down.
    ///
    /// Call exactly once at process shutdown. Any operation after `close`
    /// fails promptly with a pool-closed error; nothing hangs. No timeout
    /// or cancellation is applied to queries still running; a hung query
    /// holds its lease until the backend gives up.
    pub fn close(&self) {
        tracing::debug!("closing postgres pool");
        self.pool.close();
    }
}
