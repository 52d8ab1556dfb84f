pub mod exercises;
pub mod main;
pub mod secure;
pub mod vulnerable;

use crate::db::sqlite::LabStorage;
use crate::middleware::ClientAddr;
use tracing::warn;

/// Append one attempt record; a logging failure is warned about rather than
/// turned into a response error, so the learner still sees the route outcome.
pub(crate) async fn record_attempt(
    storage: &LabStorage,
    exercise: &str,
    input: &str,
    success: bool,
    addr: &ClientAddr,
) {
    if let Err(e) = storage
        .log_attempt(exercise, input, success, &addr.to_string())
        .await
    {
        warn!(exercise, error = %e, "failed to record exercise attempt");
    }
}
