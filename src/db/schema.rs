//! SQL DDL for initializing the lab database.
//! SQLite-first design; timestamps are stored as text.

/// Four-table schema:
/// - `users` for the authentication exercises (passwords kept in plaintext on purpose)
/// - `products` and `comments` for the search, item and comment exercises
/// - `exercise_logs` as the append-only attempt log
///
/// `created_at`/`timestamp` default to `datetime('now')` so rows inserted by
/// injected statements still get a timestamp.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NULL,
    price REAL NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id INTEGER NOT NULL REFERENCES products(id),
    author TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS exercise_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exercise_name TEXT NOT NULL,
    user_input TEXT NULL,
    success INTEGER NOT NULL DEFAULT 0,
    ip_address TEXT NULL,
    timestamp TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_exercise_logs_name_success
    ON exercise_logs(exercise_name, success);
"#;
