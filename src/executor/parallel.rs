use deadpool_postgres::Pool;
use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::error::{ParallelFailure, PgAdapterError};
use crate::query::QueryAndParams;
use crate::results::ResultSet;

use super::run_statement;

/// Run every query concurrently against the pool, collecting results by
/// submission index.
///
/// Each query runs as its own task on its own pool-managed lease, so
/// database-tier parallelism is bounded by pool size. Completions are
/// processed as they arrive; the first failure returns immediately with
/// the error and whatever had already completed, slot-aligned. In-flight
/// queries are neither cancelled nor awaited; their tasks run to
/// completion detached and their results are discarded.
///
/// Not for queries with ordering dependencies or interdependent side
/// effects; that contract belongs to the caller.
pub(crate) async fn run_parallel(
    pool: &Pool,
    queries: Vec<QueryAndParams>,
) -> Result<Vec<ResultSet>, ParallelFailure> {
    let total = queries.len();
    let mut slots: Vec<Option<ResultSet>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);

    let mut in_flight = FuturesUnordered::new();
    for (index, query) in queries.into_iter().enumerate() {
        let pool = pool.clone();
        in_flight.push(tokio::spawn(async move {
            let result = run_one(&pool, &query).await;
            (index, result)
        }));
    }

    while let Some(joined) = in_flight.next().await {
        let (index, result) = match joined {
            Ok(pair) => pair,
            Err(join_error) => {
                return Err(ParallelFailure {
                    error: PgAdapterError::ExecutionError(format!(
                        "parallel worker failed: {join_error}"
                    )),
                    partial: slots,
                });
            }
        };

        match result {
            Ok(result_set) => slots[index] = Some(result_set),
            Err(error) => {
                tracing::warn!(index, %error, "parallel batch aborted on first failure");
                // Dropping the remaining handles detaches the in-flight
                // tasks; their results go nowhere.
                return Err(ParallelFailure {
                    error,
                    partial: slots,
                });
            }
        }
    }

    // Every slot was filled or we'd have returned above.
    Ok(slots.into_iter().map(Option::unwrap_or_default).collect())
}

/// One statement on one pool-managed lease, checked out and returned here.
async fn run_one(pool: &Pool, query: &QueryAndParams) -> Result<ResultSet, PgAdapterError> {
    let conn = pool.get().await?;
    run_statement(&conn, query).await
}
