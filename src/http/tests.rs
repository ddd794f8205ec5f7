//! Handler-level tests against the in-memory wiring.

use std::sync::Arc;

use super::views::{CreateTaskBody, TaskListQuery, UpdateTaskBody};
use super::{ApiError, AppState, Identity, logs, tasks};
use crate::board::adapters::memory::{
    InMemoryActionLogStore, InMemoryTaskStore, InMemoryUserDirectory,
};
use crate::board::domain::{TaskStatus, UserId, UserProfile};
use crate::realtime::BoardEventHub;
use axum::Json;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::{Request, StatusCode};
use eyre::OptionExt;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

type MemoryState = AppState<
    InMemoryTaskStore<DefaultClock>,
    InMemoryActionLogStore,
    InMemoryUserDirectory,
    DefaultClock,
>;

struct Api {
    state: MemoryState,
    directory: Arc<InMemoryUserDirectory>,
    caller: Identity,
}

#[fixture]
fn api() -> Api {
    let clock = Arc::new(DefaultClock);
    let directory = Arc::new(InMemoryUserDirectory::new());
    let state = AppState::new(
        Arc::new(InMemoryTaskStore::new(Arc::clone(&clock))),
        Arc::new(InMemoryActionLogStore::new()),
        Arc::clone(&directory),
        Arc::new(BoardEventHub::new()),
        clock,
    );
    Api {
        state,
        directory,
        caller: Identity::new(UserId::new()),
    }
}

fn create_body(title: &str) -> CreateTaskBody {
    CreateTaskBody {
        title: title.to_owned(),
        description: None,
        assigned_user: None,
        status: None,
        priority: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_returns_201_with_the_task(api: Api) -> eyre::Result<()> {
    let (status, Json(task)) = tasks::create_task(
        State(api.state.clone()),
        api.caller,
        Json(create_body("Ship the beta")),
    )
    .await
    .map_err(|err| eyre::eyre!("create failed with {}", err.status()))?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task.title().as_str(), "Ship the beta");
    assert_eq!(task.version(), 1);
    Ok(())
}

#[rstest]
#[case("", StatusCode::BAD_REQUEST)]
#[case("Done", StatusCode::BAD_REQUEST)]
#[tokio::test(flavor = "multi_thread")]
async fn create_maps_validation_failures_to_400(
    api: Api,
    #[case] title: &str,
    #[case] expected: StatusCode,
) {
    let result = tasks::create_task(
        State(api.state.clone()),
        api.caller,
        Json(create_body(title)),
    )
    .await;

    let Err(err) = result else {
        panic!("invalid title should be rejected");
    };
    assert_eq!(err.status(), expected);
    assert!(matches!(err, ApiError::Validation(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_title_maps_to_400(api: Api) {
    tasks::create_task(
        State(api.state.clone()),
        api.caller,
        Json(create_body("Ship the beta")),
    )
    .await
    .expect("first create should succeed");

    let result = tasks::create_task(
        State(api.state.clone()),
        api.caller,
        Json(create_body("Ship the beta")),
    )
    .await;

    let Err(err) = result else {
        panic!("duplicate title should be rejected");
    };
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_maps_to_404(api: Api) {
    let result = tasks::get_task(
        State(api.state.clone()),
        api.caller,
        Path(Uuid::new_v4()),
    )
    .await;

    let Err(err) = result else {
        panic!("unknown task should be rejected");
    };
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_version_maps_to_409_with_the_server_task(api: Api) -> eyre::Result<()> {
    let (_, Json(task)) = tasks::create_task(
        State(api.state.clone()),
        api.caller,
        Json(create_body("Contended")),
    )
    .await
    .map_err(|err| eyre::eyre!("create failed with {}", err.status()))?;

    let winner = UpdateTaskBody {
        status: Some(TaskStatus::InProgress),
        version: Some(1),
        ..UpdateTaskBody::default()
    };
    tasks::update_task(
        State(api.state.clone()),
        api.caller,
        Path(task.id().into_inner()),
        Json(winner),
    )
    .await
    .map_err(|err| eyre::eyre!("first update failed with {}", err.status()))?;

    let stale = UpdateTaskBody {
        status: Some(TaskStatus::Done),
        version: Some(1),
        ..UpdateTaskBody::default()
    };
    let result = tasks::update_task(
        State(api.state.clone()),
        api.caller,
        Path(task.id().into_inner()),
        Json(stale),
    )
    .await;

    let Err(err) = result else {
        panic!("stale update should be rejected");
    };
    assert_eq!(err.status(), StatusCode::CONFLICT);
    let ApiError::Conflict { server_task, .. } = err else {
        panic!("stale update should surface the server task");
    };
    assert_eq!(server_task.version(), 2);
    assert_eq!(server_task.status(), TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_populates_assignees(api: Api) -> eyre::Result<()> {
    let assignee = UserId::new();
    api.directory
        .insert(UserProfile::new(assignee, "ada", "ada@example.com"))
        .map_err(|err| eyre::eyre!("registration failed: {err}"))?;

    let body = CreateTaskBody {
        assigned_user: Some(assignee),
        ..create_body("Owned work")
    };
    tasks::create_task(State(api.state.clone()), api.caller, Json(body))
        .await
        .map_err(|err| eyre::eyre!("create failed with {}", err.status()))?;

    let Json(listed) = tasks::list_tasks(
        State(api.state.clone()),
        api.caller,
        Query(TaskListQuery::default()),
    )
    .await
    .map_err(|err| eyre::eyre!("list failed with {}", err.status()))?;

    let view = listed.first().ok_or_eyre("one task expected")?;
    assert_eq!(
        view.assigned_user.as_ref().map(UserProfile::username),
        Some("ada")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_confirms_and_404s_afterwards(api: Api) -> eyre::Result<()> {
    let (_, Json(task)) = tasks::create_task(
        State(api.state.clone()),
        api.caller,
        Json(create_body("Short-lived")),
    )
    .await
    .map_err(|err| eyre::eyre!("create failed with {}", err.status()))?;

    let Json(confirmation) = tasks::delete_task(
        State(api.state.clone()),
        api.caller,
        Path(task.id().into_inner()),
    )
    .await
    .map_err(|err| eyre::eyre!("delete failed with {}", err.status()))?;
    assert_eq!(confirmation.message, "Task deleted.");

    let result = tasks::get_task(
        State(api.state.clone()),
        api.caller,
        Path(task.id().into_inner()),
    )
    .await;
    let Err(err) = result else {
        panic!("deleted task should be gone");
    };
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn smart_assign_without_users_maps_to_400(api: Api) -> eyre::Result<()> {
    let (_, Json(task)) = tasks::create_task(
        State(api.state.clone()),
        api.caller,
        Json(create_body("Nobody home")),
    )
    .await
    .map_err(|err| eyre::eyre!("create failed with {}", err.status()))?;

    let result = tasks::smart_assign_task(
        State(api.state.clone()),
        api.caller,
        Path(task.id().into_inner()),
    )
    .await;

    let Err(err) = result else {
        panic!("assignment without users should be rejected");
    };
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn requests_without_an_identity_are_unauthorized() {
    let (mut parts, ()) = Request::new(()).into_parts();

    let result = Identity::from_request_parts(&mut parts, &()).await;

    let Err(err) = result else {
        panic!("missing identity should be rejected");
    };
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_identities_are_extracted() {
    let caller = Identity::new(UserId::new());
    let (mut parts, ()) = Request::new(()).into_parts();
    parts.extensions.insert(caller);

    let extracted = Identity::from_request_parts(&mut parts, &())
        .await
        .expect("stamped identity should extract");
    assert_eq!(extracted, caller);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn log_feed_returns_newest_first(api: Api) -> eyre::Result<()> {
    for title in ["First task", "Second task"] {
        tasks::create_task(State(api.state.clone()), api.caller, Json(create_body(title)))
            .await
            .map_err(|err| eyre::eyre!("create failed with {}", err.status()))?;
    }

    let Json(feed) = logs::recent_logs(State(api.state.clone()), api.caller)
        .await
        .map_err(|err| eyre::eyre!("log feed failed with {}", err.status()))?;

    assert_eq!(feed.len(), 2);
    let newest = feed.first().ok_or_eyre("newest record expected")?;
    assert_eq!(newest.task.title.as_str(), "Second task");
    Ok(())
}
