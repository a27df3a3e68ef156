use crate::types::RowValues;

/// A SQL string and its bound parameters bundled together.
///
/// The query text uses positional `$1`-style placeholders whose count and
/// order match `params`. Built by hand, by [`From`] promotion of a plain
/// string, or by the [`sql!`](crate::sql) macro:
/// ```rust
/// use pg_adapter::prelude::*;
///
/// let qp = QueryAndParams::new(
///     "INSERT INTO t (id, name) VALUES ($1, $2)",
///     vec![RowValues::Int(1), RowValues::Text("alice".into())],
/// );
/// # let _ = qp;
/// ```
#[derive(Debug, Clone)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query string and parameters.
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Create a new `QueryAndParams` with no parameters.
    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }
}

impl From<&str> for QueryAndParams {
    fn from(query: &str) -> Self {
        Self::new_without_params(query)
    }
}

impl From<String> for QueryAndParams {
    fn from(query: String) -> Self {
        Self::new_without_params(query)
    }
}

impl From<&QueryAndParams> for QueryAndParams {
    fn from(query: &QueryAndParams) -> Self {
        query.clone()
    }
}

/// Anything [`parallel`](crate::PgAdapter::parallel) or
/// [`transact`](crate::PgAdapter::transact) accepts as a batch.
///
/// Normalizes the accepted call shapes into one canonical query list:
/// a `Vec` or array of queries, of plain strings, or a single query.
/// Strings are promoted to parameterless queries. No validation happens
/// here; malformed SQL surfaces as a database error at execution time.
pub trait IntoQueryBatch {
    /// Convert into the canonical ordered query list.
    fn into_queries(self) -> Vec<QueryAndParams>;
}

impl<T> IntoQueryBatch for Vec<T>
where
    T: Into<QueryAndParams>,
{
    fn into_queries(self) -> Vec<QueryAndParams> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T, const N: usize> IntoQueryBatch for [T; N]
where
    T: Into<QueryAndParams>,
{
    fn into_queries(self) -> Vec<QueryAndParams> {
        self.into_iter().map(Into::into).collect()
    }
}

impl IntoQueryBatch for &[QueryAndParams] {
    fn into_queries(self) -> Vec<QueryAndParams> {
        self.to_vec()
    }
}

impl IntoQueryBatch for QueryAndParams {
    fn into_queries(self) -> Vec<QueryAndParams> {
        vec![self]
    }
}

impl IntoQueryBatch for &str {
    fn into_queries(self) -> Vec<QueryAndParams> {
        vec![self.into()]
    }
}

impl IntoQueryBatch for String {
    fn into_queries(self) -> Vec<QueryAndParams> {
        vec![self.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotes_strings_to_parameterless_queries() {
        let queries = vec!["SELECT 1", "SELECT 2"].into_queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].query, "SELECT 1");
        assert!(queries[0].params.is_empty());
    }

    #[test]
    fn accepts_single_query() {
        let queries = "SELECT 1".into_queries();
        assert_eq!(queries.len(), 1);
    }

    #[test]
    fn keeps_submission_order() {
        let queries = [
            QueryAndParams::new("SELECT $1", vec![RowValues::Int(1)]),
            QueryAndParams::new_without_params("SELECT 2"),
        ]
        .into_queries();
        assert_eq!(queries[0].query, "SELECT $1");
        assert_eq!(queries[1].query, "SELECT 2");
        assert_eq!(queries[0].params, vec![RowValues::Int(1)]);
    }
}
