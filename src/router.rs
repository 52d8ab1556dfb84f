use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

use crate::catalog::ExerciseCatalog;
use crate::db::sqlite::LabStorage;
use crate::handlers::{exercises, main, secure, vulnerable};

#[derive(Clone)]
pub struct LabState {
    pub storage: LabStorage,
    pub catalog: ExerciseCatalog,
    cookie_key: Key,
}

impl LabState {
    /// `secret` feeds the private cookie jar and must be at least 32 bytes.
    pub fn new(storage: LabStorage, catalog: ExerciseCatalog, secret: &str) -> Self {
        Self {
            storage,
            catalog,
            cookie_key: Key::derive_from(secret.as_bytes()),
        }
    }
}

impl FromRef<LabState> for Key {
    fn from_ref(state: &LabState) -> Key {
        state.cookie_key.clone()
    }
}

pub fn lab_router(state: LabState) -> Router {
    Router::new()
        .route("/", get(main::index))
        .route("/dashboard", get(main::dashboard))
        .route("/acknowledge-warning", post(main::acknowledge_warning))
        .route("/health", get(main::health))
        .route("/vulnerable/login", post(vulnerable::login))
        .route("/vulnerable/search", get(vulnerable::search))
        .route("/vulnerable/item", get(vulnerable::item_detail))
        .route("/vulnerable/comment", post(vulnerable::comment))
        .route("/vulnerable/boolean", get(vulnerable::boolean_blind))
        .route("/vulnerable/time", get(vulnerable::time_blind))
        .route("/secure/login", post(secure::login))
        .route("/secure/search", get(secure::search))
        .route("/secure/item", get(secure::item_detail))
        .route("/secure/comment", post(secure::comment))
        .route("/secure/boolean", get(secure::boolean_blind))
        .route("/secure/time", get(secure::time_blind))
        .route("/exercises/{id}", get(exercises::exercise_detail))
        .route("/exercises/{id}/verify", post(exercises::verify_exercise))
        .with_state(state)
}
