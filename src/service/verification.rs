//! Completion verification.
//!
//! Advisory only: the decision reads the shared attempt log, which does not
//! record which side of a route pair wrote an entry, so a success logged via
//! the secure route satisfies the same exercise.

use crate::db::sqlite::LabStorage;
use crate::error::LabError;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// How many recent attempt records the decision inspects.
pub const RECENT_ATTEMPT_WINDOW: i64 = 5;

/// Pass iff at least one of the most recent successful attempts exists for the
/// exercise name.
pub async fn exercise_completed(
    storage: &LabStorage,
    exercise_name: &str,
) -> Result<bool, LabError> {
    let recent = storage
        .recent_successes(exercise_name, RECENT_ATTEMPT_WINDOW)
        .await?;
    Ok(!recent.is_empty())
}

/// Mint an opaque 128-bit completion token, URL-safe encoded.
pub fn mint_completion_token() -> String {
    let mut raw = [0u8; 16];
    fastrand::fill(&mut raw);
    URL_SAFE_NO_PAD.encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_urlsafe_and_opaque() {
        let token = mint_completion_token();
        assert_eq!(token.len(), 22); // 16 bytes, base64 without padding
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn tokens_differ_between_mints() {
        assert_ne!(mint_completion_token(), mint_completion_token());
    }
}
