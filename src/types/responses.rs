//! Outbound JSON payloads.
//!
//! The row-shaped payloads are generic so the vulnerable routes can return
//! dynamic JSON rows while the secure routes return the typed models.

use crate::catalog::{Difficulty, ExerciseDefinition};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LoginOutcome<U> {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<U>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults<P> {
    pub query: String,
    pub products: Vec<P>,
}

#[derive(Debug, Serialize)]
pub struct ItemDetail<P, C> {
    pub product: P,
    pub comment_count: usize,
    pub comments: Vec<C>,
}

#[derive(Debug, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BlindProbe {
    pub result: &'static str,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct TimingProbe {
    pub result: String,
    pub response_time: f64,
}

#[derive(Debug, Serialize)]
pub struct VerifyOutcome {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub endpoint: &'static str,
}

impl From<&ExerciseDefinition> for DashboardEntry {
    fn from(def: &ExerciseDefinition) -> Self {
        Self {
            id: def.id,
            name: def.name,
            difficulty: def.difficulty,
            description: def.description,
            endpoint: def.vulnerable_endpoint,
        }
    }
}
