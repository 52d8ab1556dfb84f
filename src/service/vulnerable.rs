//! Interpolated query builders for the vulnerable route family.
//!
//! Input is spliced into the statement text verbatim. No escaping, no binding,
//! no validation: that is the exercise. The statement builders are split from
//! the executors so the splicing itself is unit-testable.
//!
//! Result rows are rendered as dynamic JSON objects because an injected
//! statement can change the result shape entirely (UNION payloads return user
//! rows through the product endpoint, for example).

use crate::db::sqlite::SqlitePool;
use crate::error::LabError;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};
use tracing::debug;

pub fn login_sql(username: &str, password: &str) -> String {
    format!("SELECT * FROM users WHERE username = '{username}' AND password = '{password}'")
}

pub fn search_sql(term: &str) -> String {
    format!("SELECT * FROM products WHERE name LIKE '%{term}%' OR description LIKE '%{term}%'")
}

pub fn item_sql(raw_id: &str) -> String {
    format!(
        "SELECT p.*, COUNT(c.id) AS comment_count FROM products p LEFT JOIN comments c ON p.id = c.product_id WHERE p.id = {raw_id} GROUP BY p.id"
    )
}

pub fn item_comments_sql(raw_id: &str) -> String {
    format!("SELECT * FROM comments WHERE product_id = {raw_id}")
}

pub fn comment_sql(raw_product_id: &str, author: &str, content: &str) -> String {
    format!(
        "INSERT INTO comments (product_id, author, content) VALUES ({raw_product_id}, '{author}', '{content}')"
    )
}

pub fn boolean_sql(raw_user_id: &str) -> String {
    format!(
        "SELECT * FROM users WHERE id = {raw_user_id} AND (SELECT COUNT(*) FROM users WHERE role = 'admin') > 0"
    )
}

pub fn timing_sql(raw_user_id: &str) -> String {
    format!(
        "SELECT * FROM users WHERE id = {raw_user_id} AND (SELECT CASE WHEN (SELECT COUNT(*) FROM users WHERE role = 'admin') > 0 THEN 1 ELSE 0 END) = 1"
    )
}

/// Login lookup with both form fields concatenated into the statement.
pub async fn login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<Value>, LabError> {
    let sql = login_sql(username, password);
    debug!(%sql, "executing interpolated login query");
    let row = sqlx::query(&sql).fetch_optional(pool).await?;
    Ok(row.map(|r| row_to_json(&r)))
}

/// Product search over name and description.
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<Value>, LabError> {
    let sql = search_sql(term);
    debug!(%sql, "executing interpolated search query");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows.iter().map(row_to_json).collect())
}

/// Item detail plus its comments, both keyed by the raw id text.
pub async fn item_detail(
    pool: &SqlitePool,
    raw_id: &str,
) -> Result<Option<(Value, Vec<Value>)>, LabError> {
    let sql = item_sql(raw_id);
    debug!(%sql, "executing interpolated item query");
    let Some(product) = sqlx::query(&sql).fetch_optional(pool).await? else {
        return Ok(None);
    };
    let comments = sqlx::query(&item_comments_sql(raw_id))
        .fetch_all(pool)
        .await?;
    Ok(Some((
        row_to_json(&product),
        comments.iter().map(row_to_json).collect(),
    )))
}

/// Comment insert with all three form fields spliced in.
pub async fn insert_comment(
    pool: &SqlitePool,
    raw_product_id: &str,
    author: &str,
    content: &str,
) -> Result<(), LabError> {
    let sql = comment_sql(raw_product_id, author, content);
    debug!(%sql, "executing interpolated comment insert");
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}

/// Boolean-blind probe: the response differs on whether a row came back.
pub async fn boolean_probe(pool: &SqlitePool, raw_user_id: &str) -> Result<bool, LabError> {
    let sql = boolean_sql(raw_user_id);
    debug!(%sql, "executing interpolated boolean probe");
    Ok(sqlx::query(&sql).fetch_optional(pool).await?.is_some())
}

/// Time-blind probe; the caller measures wall-clock latency around this.
pub async fn timing_probe(pool: &SqlitePool, raw_user_id: &str) -> Result<bool, LabError> {
    let sql = timing_sql(raw_user_id);
    debug!(%sql, "executing interpolated timing probe");
    Ok(sqlx::query(&sql).fetch_optional(pool).await?.is_some())
}

/// Render a row as a JSON object keyed by column name. Values are decoded by
/// their actual SQLite type, not the declared column type, since injected
/// statements routinely return expression columns.
pub fn row_to_json(row: &SqliteRow) -> Value {
    let mut object = Map::new();
    for (idx, column) in row.columns().iter().enumerate() {
        object.insert(column.name().to_string(), column_value(row, idx));
    }
    Value::Object(object)
}

fn column_value(row: &SqliteRow, idx: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    // BLOB or anything else undecodable
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_sql_splices_payload_verbatim() {
        let sql = login_sql("admin'--", "anything");
        assert_eq!(
            sql,
            "SELECT * FROM users WHERE username = 'admin'--' AND password = 'anything'"
        );
    }

    #[test]
    fn search_sql_does_not_escape_quotes() {
        let sql = search_sql("x' UNION SELECT 1,2,3,4,5--");
        assert!(sql.contains("'%x' UNION SELECT 1,2,3,4,5--%'"));
    }

    #[test]
    fn numeric_splice_is_unquoted() {
        assert_eq!(
            boolean_sql("1 AND 1=2"),
            "SELECT * FROM users WHERE id = 1 AND 1=2 AND (SELECT COUNT(*) FROM users WHERE role = 'admin') > 0"
        );
    }

    #[test]
    fn statements_are_single_line() {
        // A trailing `--` in any input must comment out the rest of the statement.
        for sql in [
            login_sql("a", "b"),
            search_sql("c"),
            item_sql("1"),
            comment_sql("1", "a", "b"),
            boolean_sql("1"),
            timing_sql("1"),
        ] {
            assert!(!sql.contains('\n'));
        }
    }
}
