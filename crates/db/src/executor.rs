// crates/db/src/executor.rs
//! Executes audit query specifications against the `options` table.
//!
//! Every threshold, limit and name pattern is bound through a `?`
//! placeholder. Sizes are measured as `LENGTH(CAST(option_value AS BLOB))`,
//! i.e. bytes rather than characters.

use async_trait::async_trait;
use options_audit_core::{OptionRow, OptionStore, RowQuery, ScalarQuery, StoreError};
use tracing::debug;

use crate::{Database, DbError};

const SIZE_EXPR: &str = "LENGTH(CAST(option_value AS BLOB))";

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

/// SQL text for a scalar aggregate. Scalar queries carry no parameters.
pub fn render_scalar_query(query: &ScalarQuery) -> String {
    match query {
        ScalarQuery::CountAll => "SELECT COUNT(*) FROM options".to_string(),
        ScalarQuery::CountAutoload => "SELECT COUNT(*) FROM options WHERE autoload = 1".to_string(),
        ScalarQuery::SumAutoloadBytes => format!(
            "SELECT COALESCE(SUM({SIZE_EXPR}), 0) FROM options WHERE autoload = 1"
        ),
    }
}

/// SQL text plus bound parameters for a row listing.
pub fn render_row_query(query: &RowQuery) -> (String, Vec<SqlParam>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut params = Vec::new();

    if query.autoload_only {
        conditions.push("autoload = 1".to_string());
    }
    if let Some(min) = query.min_bytes {
        conditions.push(format!("{SIZE_EXPR} >= ?"));
        params.push(SqlParam::Int(min));
    }
    if !query.name_prefixes.is_empty() {
        let alternatives: Vec<&str> = query
            .name_prefixes
            .iter()
            .map(|_| r"option_name LIKE ? ESCAPE '\'")
            .collect();
        conditions.push(format!("({})", alternatives.join(" OR ")));
        params.extend(
            query
                .name_prefixes
                .iter()
                .map(|p| SqlParam::Text(like_prefix(p))),
        );
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT option_name, autoload, {SIZE_EXPR} AS size_bytes FROM options{where_clause} \
         ORDER BY size_bytes DESC, option_name ASC LIMIT ?"
    );
    params.push(SqlParam::Int(query.limit));
    (sql, params)
}

/// `LIKE` pattern matching names that start with `prefix` literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 8);
    for ch in prefix.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::with_source("option store query failed", err)
    }
}

#[async_trait]
impl OptionStore for Database {
    async fn scalar(&self, query: &ScalarQuery) -> Result<i64, StoreError> {
        let sql = render_scalar_query(query);
        let (value,): (i64,) = sqlx::query_as(&sql)
            .fetch_one(self.pool())
            .await
            .map_err(DbError::from)?;
        Ok(value)
    }

    async fn rows(&self, query: &RowQuery) -> Result<Vec<OptionRow>, StoreError> {
        let (sql, params) = render_row_query(query);
        debug!(query = query.label, sql = %sql, params = params.len(), "Running option listing");

        let mut q = sqlx::query_as::<_, (String, bool, i64)>(&sql);
        for param in params {
            q = match param {
                SqlParam::Int(v) => q.bind(v),
                SqlParam::Text(s) => q.bind(s),
            };
        }
        let rows = q.fetch_all(self.pool()).await.map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|(name, autoload, size_bytes)| OptionRow {
                name,
                autoload,
                size_bytes,
            })
            .collect())
    }
}
