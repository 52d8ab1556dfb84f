//! Parameter-bound counterparts to the vulnerable builders.
//!
//! Every user-supplied value is bound, so input can never alter statement
//! structure. Numeric identifiers are parsed up front and rejected when they
//! are not well-formed integers.

use crate::db::models::{Comment, Product, User};
use crate::db::sqlite::SqlitePool;
use crate::error::LabError;
use chrono::Utc;

/// Parse a numeric identifier, rejecting anything that is not an integer.
/// `what` names the field in the user-visible message ("product ID", "user ID").
pub fn parse_id(raw: &str, what: &str) -> Result<i64, LabError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| LabError::InvalidInput(format!("Invalid {what}")))
}

pub async fn login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, LabError> {
    let user = sqlx::query_as::<_, User>(
        r#"SELECT id, username, password, role, created_at
           FROM users WHERE username = ? AND password = ?"#,
    )
    .bind(username)
    .bind(password)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn search_products(pool: &SqlitePool, term: &str) -> Result<Vec<Product>, LabError> {
    let pattern = format!("%{term}%");
    let products = sqlx::query_as::<_, Product>(
        r#"SELECT id, name, description, price, created_at
           FROM products WHERE name LIKE ? OR description LIKE ?"#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn product_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Product>, LabError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, created_at FROM products WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn comments_for_product(
    pool: &SqlitePool,
    product_id: i64,
) -> Result<Vec<Comment>, LabError> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"SELECT id, product_id, author, content, created_at
           FROM comments WHERE product_id = ? ORDER BY id"#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(comments)
}

pub async fn insert_comment(
    pool: &SqlitePool,
    product_id: i64,
    author: &str,
    content: &str,
) -> Result<(), LabError> {
    sqlx::query(
        "INSERT INTO comments (product_id, author, content, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(product_id)
    .bind(author)
    .bind(content)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, LabError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password, role, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn admin_exists(pool: &SqlitePool) -> Result<bool, LabError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42", "product ID").unwrap(), 42);
        assert_eq!(parse_id(" 7 ", "product ID").unwrap(), 7);
    }

    #[test]
    fn parse_id_rejects_injection_shapes() {
        for raw in ["1 OR 1=1", "abc", "1; DROP TABLE users", "", "1.5"] {
            let err = parse_id(raw, "user ID").unwrap_err();
            assert!(matches!(err, LabError::InvalidInput(_)));
        }
    }
}
