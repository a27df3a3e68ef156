use deadpool_postgres::Pool;
use tokio_postgres::Client;

use crate::error::{PgAdapterError, TxStage};
use crate::query::QueryAndParams;
use crate::results::ResultSet;

use super::run_statement;

/// Run the queries in strict order on one leased connection, wrapped in
/// BEGIN/COMMIT, rolling back on the first error.
///
/// Statement i+1 never starts before statement i resolves. Any failure
/// (BEGIN, a statement, or COMMIT) goes through the rollback path and the
/// caller sees an error, never partial transaction results. If ROLLBACK
/// itself fails, that error supersedes the triggering one in the report
/// (the transaction's end state is unknown at that point); the original
/// stays in the source chain.
///
/// The lease is returned to the pool when the guard drops, which covers
/// every exit path including panics.
pub(crate) async fn run_transaction(
    pool: &Pool,
    queries: Vec<QueryAndParams>,
) -> Result<Vec<ResultSet>, PgAdapterError> {
    let conn = pool.get().await?;
    let client: &Client = &conn;

    if let Err(source) = client.batch_execute("BEGIN").await {
        // BEGIN may or may not have taken effect; ROLLBACK outside a
        // transaction is a harmless no-op, so take the rollback path.
        let cause = PgAdapterError::Control {
            stage: TxStage::Begin,
            source,
        };
        return Err(roll_back(client, cause).await);
    }

    let mut results = Vec::with_capacity(queries.len());
    for query in &queries {
        match run_statement(client, query).await {
            Ok(result_set) => results.push(result_set),
            Err(error) => return Err(roll_back(client, error).await),
        }
    }

    if let Err(source) = client.batch_execute("COMMIT").await {
        let cause = PgAdapterError::Control {
            stage: TxStage::Commit,
            source,
        };
        return Err(roll_back(client, cause).await);
    }

    Ok(results)
}

/// Issue ROLLBACK and decide which error the caller sees.
async fn roll_back(client: &Client, cause: PgAdapterError) -> PgAdapterError {
    tracing::warn!(%cause, "rolling back transaction");
    match client.batch_execute("ROLLBACK").await {
        Ok(()) => cause,
        Err(rollback) => {
            tracing::warn!(%rollback, "rollback failed; transaction end state unknown");
            PgAdapterError::RollbackFailed {
                rollback,
                cause: Box::new(cause),
            }
        }
    }
}
