use crate::db::models::AttemptLog;
use crate::db::schema::SQLITE_INIT;
use crate::error::LabError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the lab database.
///
/// Foreign keys stay unenforced: several exercises deliberately insert rows
/// that would violate them.
pub async fn connect(database_url: &str) -> Result<SqlitePool, LabError> {
    let file = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    if file != ":memory:"
        && let Some(parent) = std::path::Path::new(file).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(false);
    Ok(SqlitePoolOptions::new().connect_with(options).await?)
}

#[derive(Clone)]
pub struct LabStorage {
    pool: SqlitePool,
}

const SEED_USERS: &[(&str, &str, &str)] = &[
    ("admin", "admin123", "admin"),
    ("alice", "password123", "user"),
    ("bob", "secret456", "user"),
    ("charlie", "mypassword", "user"),
];

const SEED_PRODUCTS: &[(&str, &str, f64)] = &[
    ("Wooden Chair", "Handcrafted oak chair", 299.99),
    ("Dining Table", "Solid wood dining table", 899.99),
    ("Bookshelf", "5-tier wooden bookshelf", 199.99),
    ("Coffee Table", "Modern wooden coffee table", 399.99),
    ("Bed Frame", "Queen size wooden bed frame", 1299.99),
];

const SEED_COMMENTS: &[(i64, &str, &str)] = &[
    (1, "alice", "Beautiful craftsmanship!"),
    (1, "bob", "Very sturdy and well-made."),
    (2, "charlie", "Perfect for family dinners."),
    (3, "alice", "Great storage solution."),
];

impl LabStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), LabError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert the stock users, products and comments, but only into an empty
    /// database. Re-running against a populated file is a no-op.
    pub async fn seed_if_empty(&self) -> Result<(), LabError> {
        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if user_count > 0 {
            return Ok(());
        }

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for &(username, password, role) in SEED_USERS {
            sqlx::query(
                "INSERT INTO users (username, password, role, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(username)
            .bind(password)
            .bind(role)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        for &(name, description, price) in SEED_PRODUCTS {
            sqlx::query(
                "INSERT INTO products (name, description, price, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(name)
            .bind(description)
            .bind(price)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        for &(product_id, author, content) in SEED_COMMENTS {
            sqlx::query(
                "INSERT INTO comments (product_id, author, content, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(product_id)
            .bind(author)
            .bind(content)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("database seeded");
        Ok(())
    }

    /// Append one attempt record. No deduplication and no rate limiting; both
    /// the vulnerable and the secure route of a pair log under the same
    /// exercise name.
    pub async fn log_attempt(
        &self,
        exercise_name: &str,
        user_input: &str,
        success: bool,
        ip_address: &str,
    ) -> Result<i64, LabError> {
        let success_i = if success { 1 } else { 0 };
        let result = sqlx::query(
            r#"INSERT INTO exercise_logs (exercise_name, user_input, success, ip_address, timestamp)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(exercise_name)
        .bind(user_input)
        .bind(success_i)
        .bind(ip_address)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Most recent successful attempts for an exercise, newest first.
    pub async fn recent_successes(
        &self,
        exercise_name: &str,
        limit: i64,
    ) -> Result<Vec<AttemptLog>, LabError> {
        let rows = sqlx::query_as::<_, AttemptLog>(
            r#"SELECT id, exercise_name, user_input, success, ip_address, timestamp
               FROM exercise_logs
               WHERE exercise_name = ? AND success = 1
               ORDER BY timestamp DESC, id DESC
               LIMIT ?"#,
        )
        .bind(exercise_name)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
