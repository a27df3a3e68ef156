//! Lightweight async adapter for PostgreSQL over a `deadpool` pool.
//!
//! Three execution modes behind one small surface:
//!
//! - [`PgAdapter::query`]: one statement on a pool-managed lease;
//! - [`PgAdapter::parallel`]: a batch of independent queries run
//!   concurrently, results slot-aligned with submission order, first
//!   failure reported together with the partial results;
//! - [`PgAdapter::transact`]: a batch run in strict order inside
//!   BEGIN/COMMIT on one leased connection, rolled back as a unit on any
//!   failure.
//!
//! Queries are built with the [`sql!`] macro (or by hand as
//! [`QueryAndParams`]): embedded values become positional `$1`-style
//! placeholders, bound rather than spliced, so interpolation is
//! injection-safe.
//!
//! ```rust,no_run
//! use pg_adapter::prelude::*;
//! use pg_adapter::sql;
//!
//! # async fn demo(db: PgAdapter) -> Result<(), PgAdapterError> {
//! let user_id = 3i64;
//! let results = db
//!     .transact([
//!         sql!("INSERT INTO tasks (user_id, name) VALUES (", user_id, ", ", "laundry", ")"),
//!         sql!("UPDATE days SET work_time = work_time + 1 WHERE user_id = ", user_id, ""),
//!     ])
//!     .await?;
//! assert_eq!(results.len(), 2);
//! # Ok(()) }
//! ```
//!
//! The adapter performs no retries, timeouts, or cancellation; pool sizing
//! and statement timeouts belong to pool and server configuration.

pub mod adapter;
pub mod builder;
pub mod error;
pub mod prelude;
pub mod query;
pub mod results;
pub mod types;

mod executor;
mod params;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use adapter::PgAdapter;
pub use error::{ParallelFailure, PgAdapterError, TxStage};
pub use query::{IntoQueryBatch, QueryAndParams};
pub use results::{ColumnSet, ResultSet, Row};
pub use types::RowValues;
