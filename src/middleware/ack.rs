use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar};
use serde_json::json;

/// Private cookie set once the learner has acknowledged the legal warning.
pub const LEGAL_ACK_COOKIE: &str = "legal_acknowledged";

pub fn acknowledgement_cookie() -> Cookie<'static> {
    Cookie::build((LEGAL_ACK_COOKIE, "true"))
        .path("/")
        .http_only(true)
        .build()
}

/// Gate for the vulnerable route family: rejects with 403 until the
/// acknowledgement cookie is present. The secure routes are ungated.
#[derive(Debug, Clone, Copy)]
pub struct RequireLegalAck;

impl<S> FromRequestParts<S> for RequireLegalAck
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(infallible) => match infallible {},
        };

        if jar
            .get(LEGAL_ACK_COOKIE)
            .is_some_and(|c| c.value() == "true")
        {
            return Ok(Self);
        }

        Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": {
                    "code": "LEGAL_ACK_REQUIRED",
                    "message": "Acknowledge the legal warning before using the vulnerable routes."
                }
            })),
        )
            .into_response())
    }
}
