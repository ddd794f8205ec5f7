//! REST adapter over the board services.
//!
//! Routes mirror the board API: task CRUD plus smart-assign under
//! `/tasks`, the activity feed under `/logs`, and an unauthenticated
//! root banner. All board routes require an [`Identity`] request
//! extension injected by the external auth middleware.

pub mod auth;
pub mod error;
pub mod logs;
pub mod state;
pub mod tasks;
pub mod views;

pub use auth::{Identity, identity_extension};
pub use error::ApiError;
pub use state::AppState;

use crate::board::ports::{ActionLogStore, TaskStore, UserDirectory};
use axum::Router;
use axum::routing::{get, post, put};
use mockable::Clock;
use tower_http::cors::CorsLayer;

/// Builds the board router over the given state.
pub fn build_router<S, L, D, C>(state: AppState<S, L, D, C>) -> Router
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let router: Router<AppState<S, L, D, C>> = Router::new()
        .route("/", get(banner))
        .route("/tasks", post(tasks::create_task).get(tasks::list_tasks))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{id}/smart-assign", put(tasks::smart_assign_task))
        .route("/logs", get(logs::recent_logs))
        .layer(CorsLayer::permissive());
    router.with_state(state)
}

/// `GET /` — unauthenticated service banner.
async fn banner() -> &'static str {
    "Trellis task board API"
}

#[cfg(test)]
mod tests;
