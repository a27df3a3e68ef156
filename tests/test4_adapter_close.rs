#![cfg(feature = "test-utils")]

use pg_adapter::prelude::*;
use pg_adapter::test_utils::testing_postgres::{setup_postgres_embedded, stop_postgres_embedded};

#[test]
fn operations_after_close_fail_fast() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pg = setup_postgres_embedded("close_test").await?;
        let db = PgAdapter::new(pg.config.clone())?;

        let before = db.query("SELECT 1 AS one").await?;
        assert_eq!(*before.rows[0].get("one").unwrap().as_int().unwrap(), 1);

        db.close();

        // Every operation must error promptly rather than hang.
        let query_err = db.query("SELECT 1").await.expect_err("pool is closed");
        assert!(matches!(query_err, PgAdapterError::Pool(_)));

        let parallel_err = db
            .parallel(["SELECT 1", "SELECT 2"])
            .await
            .expect_err("pool is closed");
        assert!(matches!(parallel_err.error, PgAdapterError::Pool(_)));
        assert_eq!(parallel_err.partial.len(), 2);
        assert!(parallel_err.partial.iter().all(Option::is_none));

        let transact_err = db
            .transact(["SELECT 1"])
            .await
            .expect_err("pool is closed");
        assert!(matches!(transact_err, PgAdapterError::Pool(_)));

        stop_postgres_embedded(pg).await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
