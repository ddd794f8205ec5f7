//! Task route handlers.

use super::views::{
    CreateTaskBody, MessageBody, TaskListQuery, TaskWithAssignee, UpdateTaskBody,
};
use super::{ApiError, AppState, Identity};
use crate::board::domain::{Task, TaskId};
use crate::board::ports::{ActionLogStore, TaskStore, UserDirectory};
use crate::board::services::{CreateTaskRequest, UpdateTaskRequest};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use mockable::Clock;
use uuid::Uuid;

/// `POST /tasks` — creates a task.
pub async fn create_task<S, L, D, C>(
    State(state): State<AppState<S, L, D, C>>,
    identity: Identity,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let mut request = CreateTaskRequest::new(body.title);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(user) = body.assigned_user {
        request = request.with_assigned_user(user);
    }
    if let Some(status) = body.status {
        request = request.with_status(status);
    }
    if let Some(priority) = body.priority {
        request = request.with_priority(priority);
    }

    let task = state.mutation().create_task(identity.user_id(), request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /tasks` — lists tasks, optionally filtered by exact title,
/// with assignees resolved to display profiles.
pub async fn list_tasks<S, L, D, C>(
    State(state): State<AppState<S, L, D, C>>,
    _identity: Identity,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskWithAssignee>>, ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = state.mutation().list_tasks(query.title.as_deref()).await?;
    let mut views = Vec::with_capacity(tasks.len());
    for task in tasks {
        views.push(populate(&state, &task).await?);
    }
    Ok(Json(views))
}

/// `GET /tasks/{id}` — fetches one task with its assignee resolved.
pub async fn get_task<S, L, D, C>(
    State(state): State<AppState<S, L, D, C>>,
    _identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskWithAssignee>, ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state.mutation().get_task(TaskId::from_uuid(id)).await?;
    Ok(Json(populate(&state, &task).await?))
}

/// `PUT /tasks/{id}` — applies a field patch through the
/// version-checked write; a stale `version` yields a 409 carrying the
/// authoritative server record.
pub async fn update_task<S, L, D, C>(
    State(state): State<AppState<S, L, D, C>>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let mut request = UpdateTaskRequest::new();
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(user) = body.assigned_user {
        request = request.with_assigned_user(user);
    }
    if let Some(status) = body.status {
        request = request.with_status(status);
    }
    if let Some(priority) = body.priority {
        request = request.with_priority(priority);
    }
    if let Some(version) = body.version {
        request = request.with_expected_version(version);
    }

    let task = state
        .mutation()
        .update_task(identity.user_id(), TaskId::from_uuid(id), request)
        .await?;
    Ok(Json(task))
}

/// `PUT /tasks/{id}/smart-assign` — assigns the least-loaded user.
pub async fn smart_assign_task<S, L, D, C>(
    State(state): State<AppState<S, L, D, C>>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state
        .mutation()
        .smart_assign_task(identity.user_id(), TaskId::from_uuid(id))
        .await?;
    Ok(Json(task))
}

/// `DELETE /tasks/{id}` — hard-deletes a task.
pub async fn delete_task<S, L, D, C>(
    State(state): State<AppState<S, L, D, C>>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageBody>, ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    state
        .mutation()
        .delete_task(identity.user_id(), TaskId::from_uuid(id))
        .await?;
    Ok(Json(MessageBody {
        message: "Task deleted.".to_owned(),
    }))
}

async fn populate<S, L, D, C>(
    state: &AppState<S, L, D, C>,
    task: &Task,
) -> Result<TaskWithAssignee, ApiError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
    C: Clock + Send + Sync + 'static,
{
    let assignee = match task.assigned_user() {
        Some(user) => state.directory().find(user).await.map_err(ApiError::internal)?,
        None => None,
    };
    Ok(TaskWithAssignee::new(task, assignee))
}
