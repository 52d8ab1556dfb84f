use axum::{Json, extract::State};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde_json::{Value, json};

use crate::middleware::acknowledgement_cookie;
use crate::router::LabState;
use crate::types::responses::DashboardEntry;

pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "sqlab",
        "warning": "Educational SQL injection lab. Authorized, local use only.",
        "dashboard": "/dashboard",
    }))
}

/// Exercise dashboard: one summary entry per catalog exercise.
pub async fn dashboard(State(state): State<LabState>) -> Json<Vec<DashboardEntry>> {
    Json(state.catalog.iter().map(DashboardEntry::from).collect())
}

/// Record that the learner has acknowledged the legal warning.
pub async fn acknowledge_warning(jar: PrivateCookieJar) -> (PrivateCookieJar, Json<Value>) {
    let jar = jar.add(acknowledgement_cookie());
    (jar, Json(json!({"status": "acknowledged"})))
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "sqlab"}))
}
