//! Activity feed route handler.

use super::{ApiError, AppState, Identity};
use crate::board::domain::PopulatedActionLog;
use crate::board::ports::{ActionLogStore, TaskStore, UserDirectory};
use axum::Json;
use axum::extract::State;
use mockable::Clock;

/// Maximum number of records served by the activity feed.
pub const RECENT_LOG_LIMIT: usize = 20;

/// `GET /logs` — returns the most recent audit records, newest first,
/// with actors resolved to display profiles.
pub async fn recent_logs<S, L, D, C>(
    State(state): State<AppState<S, L, D, C>>,
    _identity: Identity,
) -> Result<Json<Vec<PopulatedActionLog>>, ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let logs = state.mutation().audit().recent(RECENT_LOG_LIMIT).await?;
    Ok(Json(logs))
}
