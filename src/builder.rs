//! Parameterized query building.
//!
//! [`render`] turns a list of literal SQL fragments interleaved with values
//! into a [`QueryAndParams`] whose text carries positional `$1`-style
//! placeholders. The [`sql!`](crate::sql) macro is the ergonomic front end.

use std::sync::LazyLock;

use regex::Regex;

use crate::query::QueryAndParams;
use crate::types::RowValues;

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Render `fragments.len() - 1` values into the gaps between literal SQL
/// fragments, producing placeholder text plus the ordered parameter list.
///
/// Each value becomes the next positional placeholder (`$1`, `$2`, …) in
/// left-to-right order with no gaps or duplicates, including when two
/// values are adjacent with an empty fragment between them.
///
/// A fragment ending in `$` splices the following value verbatim into the
/// query text instead of binding it, and the placeholder counter does not
/// advance. This is the escape hatch for trusted identifiers (table or
/// column names); never feed it user input.
///
/// Whitespace runs in the final text are collapsed to single spaces. The
/// collapse is applied to the whole text, *including quoted string
/// literals*, which is long-standing behavior kept as documented. Bind literals
/// whose whitespace matters as parameters instead.
///
/// Pure function; no error conditions.
#[must_use]
pub fn render(fragments: &[&str], values: Vec<RowValues>) -> QueryAndParams {
    let mut text = String::new();
    let mut params: Vec<RowValues> = Vec::with_capacity(values.len());

    let mut fragment_iter = fragments.iter();
    if let Some(first) = fragment_iter.next() {
        text.push_str(first);
    }

    for (value, fragment) in values.into_iter().zip(fragment_iter) {
        if text.ends_with('$') {
            text.pop();
            text.push_str(&raw_fragment(&value));
        } else {
            params.push(value);
            text.push('$');
            text.push_str(&params.len().to_string());
        }
        text.push_str(fragment);
    }

    let collapsed = WHITESPACE_RUNS.replace_all(&text, " ").into_owned();
    QueryAndParams::new(collapsed, params)
}

/// Verbatim SQL rendition of a value, used only on the `$`-splice path.
fn raw_fragment(value: &RowValues) -> String {
    match value {
        RowValues::Int(i) => i.to_string(),
        RowValues::Float(f) => f.to_string(),
        RowValues::Text(s) => s.clone(),
        RowValues::Bool(true) => "TRUE".to_string(),
        RowValues::Bool(false) => "FALSE".to_string(),
        RowValues::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        RowValues::Null => "NULL".to_string(),
        RowValues::JSON(json) => json.to_string(),
        RowValues::Blob(bytes) => {
            let mut out = String::with_capacity(bytes.len() * 2 + 4);
            out.push_str("'\\x");
            for byte in bytes {
                out.push_str(&format!("{byte:02x}"));
            }
            out.push('\'');
            out
        }
    }
}

/// Build a [`QueryAndParams`] from alternating literal fragments and value
/// expressions, starting and ending with a fragment.
///
/// Embedded expressions become positional placeholders; their values are
/// bound, never spliced into the text, so interpolation is injection-safe:
/// ```rust
/// use pg_adapter::sql;
///
/// let id = 7;
/// let qp = sql!("SELECT name FROM tasks WHERE id = ", id, " AND done = ", false, "");
/// assert_eq!(qp.query, "SELECT name FROM tasks WHERE id = $1 AND done = $2");
/// assert_eq!(qp.params.len(), 2);
/// ```
///
/// The fragment list always starts and ends with a literal (use `""` when
/// the query ends on a value), mirroring how template fragments surround
/// their interpolations.
///
/// A fragment ending in `$` splices the next value raw (trusted
/// identifiers only; see [`render`](crate::builder::render)).
#[macro_export]
macro_rules! sql {
    ($fragment:literal $(, $value:expr, $next:literal)* $(,)?) => {
        $crate::builder::render(
            &[$fragment $(, $next)*],
            ::std::vec![$($crate::types::RowValues::from($value)),*],
        )
    };
}
