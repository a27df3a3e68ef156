// Query execution, split by orchestration strategy:
// - parallel: concurrent fan-out over pool-managed single-statement leases
// - transaction: strict-order statements on one exclusively leased connection
//
// Both funnel individual statements through `run_statement` below.

mod parallel;
mod transaction;

pub(crate) use parallel::run_parallel;
pub(crate) use transaction::run_transaction;

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;
use tokio_postgres::{Client, Statement};

use crate::error::PgAdapterError;
use crate::params::as_pg_refs;
use crate::query::QueryAndParams;
use crate::results::{ColumnSet, ResultSet, Row};
use crate::types::RowValues;

/// Prepare and execute one statement on the given client.
///
/// Statements that report result columns are queried for rows; column-less
/// DML goes through `execute` so the affected count survives into the
/// result set. The distinction is the driver's, not ours: `prepare` tells
/// us which shape to expect.
pub(crate) async fn run_statement(
    client: &Client,
    query: &QueryAndParams,
) -> Result<ResultSet, PgAdapterError> {
    let stmt = client.prepare(&query.query).await?;
    let refs = as_pg_refs(&query.params);

    if stmt.columns().is_empty() {
        let affected = client.execute(&stmt, &refs).await?;
        let affected = usize::try_from(affected).map_err(|e| {
            PgAdapterError::ExecutionError(format!("invalid rows affected count: {e}"))
        })?;
        Ok(ResultSet::from_rows_affected(affected))
    } else {
        let rows = client.query(&stmt, &refs).await?;
        build_result_set(&stmt, &rows)
    }
}

/// Build a result set using statement metadata for column names.
fn build_result_set(
    stmt: &Statement,
    rows: &[tokio_postgres::Row],
) -> Result<ResultSet, PgAdapterError> {
    let names: Vec<String> = stmt
        .columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();
    let column_count = names.len();
    let columns = std::sync::Arc::new(ColumnSet::new(names));

    let mut result_set = ResultSet {
        rows: Vec::with_capacity(rows.len()),
        rows_affected: rows.len(),
    };

    for row in rows {
        let mut values = Vec::with_capacity(column_count);
        for index in 0..column_count {
            values.push(extract_value(row, index)?);
        }
        result_set.rows.push(Row::new(columns.clone(), values));
    }

    Ok(result_set)
}

/// Extract one column of one driver row into a `RowValues`.
fn extract_value(row: &tokio_postgres::Row, idx: usize) -> Result<RowValues, PgAdapterError> {
    let type_name = row.columns()[idx].type_().name();
    match type_name {
        "int2" => {
            let val: Option<i16> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))))
        }
        "int4" => {
            let val: Option<i32> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))))
        }
        "int8" => {
            let val: Option<i64> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Int))
        }
        "float4" | "float8" => {
            let val: Option<f64> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Float))
        }
        "bool" => {
            let val: Option<bool> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Bool))
        }
        "timestamp" => {
            let val: Option<NaiveDateTime> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Timestamp))
        }
        "timestamptz" => {
            let val: Option<chrono::DateTime<chrono::Utc>> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, |v| RowValues::Timestamp(v.naive_utc())))
        }
        "json" | "jsonb" => {
            let val: Option<JsonValue> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::JSON))
        }
        "bytea" => {
            let val: Option<Vec<u8>> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Blob))
        }
        // text, varchar, char, name, and anything else we can read as text
        _ => {
            let val: Option<String> = row.try_get(idx)?;
            Ok(val.map_or(RowValues::Null, RowValues::Text))
        }
    }
}
