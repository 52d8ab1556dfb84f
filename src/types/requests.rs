//! Inbound form and query payloads.
//!
//! Fields default to empty/absent rather than rejecting, mirroring how the
//! routes treat missing input: empty search short-circuits, a missing id is a
//! 400 from the handler rather than a deserialization failure.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}
