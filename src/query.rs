//! Search statement construction.
//!
//! Bear keeps its notes in a Core Data SQLite file, which is why the table and
//! column names look the way they do. Core Data stores dates as seconds since
//! 2001-01-01 UTC; the statement adds the fixed offset back so callers read
//! plain UNIX timestamps.

/// Seconds between the UNIX epoch and the Core Data reference date (31 years).
pub const CORE_DATA_EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// Number of columns every search statement selects.
pub const SELECTED_COLUMNS: usize = 4;

const NOTE_TABLE: &str = "ZSFNOTE";
const NOT_ARCHIVED: &str = "AND ZARCHIVEDDATE IS NULL";
const NOT_TRASHED: &str = "AND ZTRASHEDDATE IS NULL";
const ORDER_BY_RECENCY: &str = "ORDER BY ZMODIFICATIONDATE DESC";

/// Which notes to leave out of the results.
///
/// Both flags are independent; any combination is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub exclude_archived: bool,
    pub exclude_trashed: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            exclude_archived: true,
            exclude_trashed: true,
        }
    }
}

impl SearchOptions {
    /// Options that exclude nothing.
    pub fn include_all() -> Self {
        Self {
            exclude_archived: false,
            exclude_trashed: false,
        }
    }
}

/// A parameterized search statement and the pattern bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStatement {
    sql: String,
    pattern: String,
}

impl SearchStatement {
    /// Returns the statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the LIKE pattern bound to each searched column.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the positional parameters, one per searched column.
    pub fn params(&self) -> [&str; 2] {
        [&self.pattern, &self.pattern]
    }

    #[cfg(test)]
    pub(crate) fn from_parts(sql: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            pattern: pattern.into(),
        }
    }
}

/// Builds the statement searching note titles and bodies for `query`.
///
/// `LIKE '%abc%'` matches `abc` anywhere in the column, ignoring ASCII case.
/// `%` and `_` inside `query` are not escaped and act as wildcards.
///
/// # Examples
///
/// ```
/// use bear_search::{SearchOptions, build_search_statement};
///
/// let statement = build_search_statement("rust", &SearchOptions::include_all());
/// assert_eq!(statement.params(), ["%rust%", "%rust%"]);
/// assert!(statement.sql().ends_with("ORDER BY ZMODIFICATIONDATE DESC"));
/// ```
pub fn build_search_statement(query: &str, options: &SearchOptions) -> SearchStatement {
    let mut parts = vec![format!(
        "SELECT ZUNIQUEIDENTIFIER, ZTITLE, \
         CAST(ZCREATIONDATE + {offset} AS INTEGER), \
         CAST(ZMODIFICATIONDATE + {offset} AS INTEGER) \
         FROM {NOTE_TABLE} \
         WHERE (ZTITLE LIKE ?1 OR ZTEXT LIKE ?2)",
        offset = CORE_DATA_EPOCH_OFFSET_SECS,
    )];

    if options.exclude_archived {
        parts.push(NOT_ARCHIVED.to_string());
    }
    if options.exclude_trashed {
        parts.push(NOT_TRASHED.to_string());
    }
    parts.push(ORDER_BY_RECENCY.to_string());

    SearchStatement {
        sql: parts.join(" "),
        pattern: format!("%{query}%"),
    }
}
