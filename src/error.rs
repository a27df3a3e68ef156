use std::fmt;

use thiserror::Error;

use crate::results::ResultSet;

/// Transaction control statement that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Begin,
    Commit,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStage::Begin => write!(f, "BEGIN"),
            TxStage::Commit => write!(f, "COMMIT"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PgAdapterError {
    /// A statement failed: syntax error, constraint violation, type
    /// mismatch, or a dead connection mid-statement.
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),

    /// Could not lease a connection: pool exhausted, closed, or the
    /// backend refused the connection.
    #[error(transparent)]
    Pool(#[from] deadpool::managed::PoolError<tokio_postgres::Error>),

    /// A transaction control statement (BEGIN or COMMIT) failed.
    #[error("{stage} failed: {source}")]
    Control {
        stage: TxStage,
        source: tokio_postgres::Error,
    },

    /// ROLLBACK itself failed while recovering from an earlier error.
    ///
    /// The most severe class: the transaction's end state is unknown. The
    /// rollback error supersedes the triggering error in the report; the
    /// original error stays reachable through [`std::error::Error::source`].
    #[error("rollback failed: {rollback}")]
    RollbackFailed {
        rollback: tokio_postgres::Error,
        #[source]
        cause: Box<PgAdapterError>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

/// Outcome of a failed [`parallel`](crate::PgAdapter::parallel) batch: the
/// first error encountered plus whatever had already completed.
///
/// `partial` is always the length of the submitted batch; slot `i` holds
/// the result of query `i` if it finished before the failure, `None` for
/// the failed query and any still in flight. This single type replaces the
/// original split where partial results were observable through one calling
/// convention but not the other.
#[derive(Debug, Error)]
#[error("parallel batch failed: {error}")]
pub struct ParallelFailure {
    /// First error encountered, in completion order.
    #[source]
    pub error: PgAdapterError,
    /// Slot-aligned results completed before the failure.
    pub partial: Vec<Option<ResultSet>>,
}

impl ParallelFailure {
    /// Split into the error and the slot-aligned partial results.
    #[must_use]
    pub fn into_parts(self) -> (PgAdapterError, Vec<Option<ResultSet>>) {
        (self.error, self.partial)
    }
}
