#![cfg(feature = "test-utils")]

use std::error::Error as _;

use pg_adapter::prelude::*;
use pg_adapter::test_utils::testing_postgres::{setup_postgres_embedded, stop_postgres_embedded};

#[test]
fn rollback_failure_supersedes_the_statement_error() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pg = setup_postgres_embedded("rollback_precedence_test").await?;
        let db = PgAdapter::new(pg.config.clone())?;

        // Terminating our own backend makes the statement fail AND takes
        // the connection down with it, so the subsequent ROLLBACK fails
        // too. The reported error must be the rollback failure, with the
        // statement error still reachable as its source.
        let error = db
            .transact([
                "SELECT pg_terminate_backend(pg_backend_pid())",
                "SELECT 1",
            ])
            .await
            .expect_err("killing the backend must fail the transaction");

        assert!(
            matches!(error, PgAdapterError::RollbackFailed { .. }),
            "expected RollbackFailed, got: {error:?}"
        );
        assert!(
            error.source().is_some(),
            "original statement error must stay in the source chain"
        );

        // The pool replaces the dead connection; the adapter stays usable.
        let alive = db.query("SELECT 1 AS one").await?;
        assert_eq!(*alive.rows[0].get("one").unwrap().as_int().unwrap(), 1);

        db.close();
        stop_postgres_embedded(pg).await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
