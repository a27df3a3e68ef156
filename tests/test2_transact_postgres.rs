#![cfg(feature = "test-utils")]

use pg_adapter::prelude::*;
use pg_adapter::sql;
use pg_adapter::test_utils::testing_postgres::{setup_postgres_embedded, stop_postgres_embedded};

#[test]
fn failed_transaction_rolls_back_earlier_statements() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pg = setup_postgres_embedded("transact_rollback_test").await?;
        let db = PgAdapter::new(pg.config.clone())?;

        db.transact([
            "CREATE TABLE tasks (id BIGINT PRIMARY KEY, name TEXT NOT NULL)",
            "CREATE TABLE counters (id INT PRIMARY KEY, value BIGINT NOT NULL)",
            "INSERT INTO counters (id, value) VALUES (1, 0)",
        ])
        .await?;

        // The insert succeeds, then the update violates NOT NULL; the
        // insert's effect must not survive.
        let error = db
            .transact([
                sql!(
                    "INSERT INTO tasks (id, name) VALUES (",
                    1i64,
                    ", ",
                    "laundry",
                    ")"
                ),
                sql!("UPDATE tasks SET name = NULL WHERE id = ", 1i64, ""),
            ])
            .await
            .expect_err("NOT NULL violation must fail the transaction");
        assert!(matches!(error, PgAdapterError::Postgres(_)));

        let count = db.query("SELECT COUNT(*) AS n FROM tasks").await?;
        assert_eq!(*count.rows[0].get("n").unwrap().as_int().unwrap(), 0);

        db.close();
        stop_postgres_embedded(pg).await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn successful_transaction_commits_all_statements() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pg = setup_postgres_embedded("transact_commit_test").await?;
        let db = PgAdapter::new(pg.config.clone())?;

        db.transact([
            "CREATE TABLE tasks (id BIGINT PRIMARY KEY, name TEXT NOT NULL)",
            "CREATE TABLE counters (id INT PRIMARY KEY, value BIGINT NOT NULL)",
            "INSERT INTO counters (id, value) VALUES (1, 0)",
        ])
        .await?;

        let results = db
            .transact([
                sql!(
                    "INSERT INTO tasks (id, name) VALUES (",
                    1i64,
                    ", ",
                    "dishes",
                    ")"
                ),
                sql!("UPDATE counters SET value = value + 1 WHERE id = 1"),
            ])
            .await?;

        // Results arrive in submission order with DML metadata intact.
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rows_affected, 1);
        assert_eq!(results[1].rows_affected, 1);

        // Both effects are durably visible afterward.
        let task = db
            .query_with("SELECT name FROM tasks WHERE id = $1", &[RowValues::Int(1)])
            .await?;
        assert_eq!(task.rows[0].get("name").unwrap().as_text().unwrap(), "dishes");
        let counter = db.query("SELECT value FROM counters WHERE id = 1").await?;
        assert_eq!(*counter.rows[0].get("value").unwrap().as_int().unwrap(), 1);

        db.close();
        stop_postgres_embedded(pg).await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn statements_run_in_order_within_a_transaction() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pg = setup_postgres_embedded("transact_order_test").await?;
        let db = PgAdapter::new(pg.config.clone())?;

        db.query("CREATE TABLE log (seq BIGSERIAL PRIMARY KEY, label TEXT NOT NULL)")
            .await?;

        db.transact([
            sql!("INSERT INTO log (label) VALUES (", "first", ")"),
            sql!("INSERT INTO log (label) VALUES (", "second", ")"),
            sql!("INSERT INTO log (label) VALUES (", "third", ")"),
        ])
        .await?;

        let rows = db.query("SELECT label FROM log ORDER BY seq").await?;
        let labels: Vec<&str> = rows
            .rows
            .iter()
            .map(|row| row.get("label").unwrap().as_text().unwrap())
            .collect();
        assert_eq!(labels, vec!["first", "second", "third"]);

        db.close();
        stop_postgres_embedded(pg).await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
