//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types to make it easier
//! to get started with the adapter.

pub use crate::adapter::PgAdapter;
pub use crate::error::{ParallelFailure, PgAdapterError, TxStage};
pub use crate::query::{IntoQueryBatch, QueryAndParams};
pub use crate::results::{ColumnSet, ResultSet, Row};
pub use crate::types::RowValues;
