use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A seeded account. The plaintext password is a pedagogical fixture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Comment {
    pub id: i64,
    pub product_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One exercise invocation. Append-only; `success` records the route handler's
/// own judgment of the outcome and is never re-verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct AttemptLog {
    pub id: i64,
    pub exercise_name: String,
    pub user_input: Option<String>,
    pub success: bool,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}
