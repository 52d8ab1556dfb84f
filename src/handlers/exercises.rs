//! Exercise catalog and verification endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar};

use crate::catalog::ExerciseDefinition;
use crate::error::LabError;
use crate::router::LabState;
use crate::service::verification;
use crate::types::responses::VerifyOutcome;

pub async fn exercise_detail(
    State(state): State<LabState>,
    Path(exercise_id): Path<String>,
) -> Result<Json<ExerciseDefinition>, LabError> {
    state
        .catalog
        .get(&exercise_id)
        .cloned()
        .map(Json)
        .ok_or(LabError::NotFound("Exercise"))
}

/// Decide completion from the attempt log and, on a pass, mint a token and
/// park it in the caller's private cookie jar keyed by exercise id.
pub async fn verify_exercise(
    State(state): State<LabState>,
    Path(exercise_id): Path<String>,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Json<VerifyOutcome>), LabError> {
    let exercise = state
        .catalog
        .get(&exercise_id)
        .ok_or(LabError::NotFound("Exercise"))?;

    if verification::exercise_completed(&state.storage, exercise.id).await? {
        let token = verification::mint_completion_token();
        let jar = jar.add(completion_cookie(exercise.id, &token));
        Ok((
            jar,
            Json(VerifyOutcome {
                success: true,
                message: "Exercise completed successfully!",
                token: Some(token),
            }),
        ))
    } else {
        Ok((
            jar,
            Json(VerifyOutcome {
                success: false,
                message: "Exercise not yet completed. Keep trying!",
                token: None,
            }),
        ))
    }
}

fn completion_cookie(exercise_id: &str, token: &str) -> Cookie<'static> {
    Cookie::build((format!("exercise_{exercise_id}_completed"), token.to_string()))
        .path("/")
        .http_only(true)
        .build()
}
