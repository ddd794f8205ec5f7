//! Audit recorder tests.

use super::support::{BoardHarness, harness, register_user, task_named};
use crate::board::adapters::memory::{InMemoryActionLogStore, InMemoryUserDirectory};
use crate::board::domain::{ActionKind, TaskSnapshot, UserId, UserProfile};
use crate::board::ports::ActionLogStore;
use crate::board::services::AuditRecorder;
use crate::realtime::{BoardEvent, BoardEventHub};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type MemoryRecorder =
    AuditRecorder<InMemoryActionLogStore, InMemoryUserDirectory, BoardEventHub, DefaultClock>;

#[fixture]
fn board() -> BoardHarness {
    harness()
}

fn recorder(board: &BoardHarness) -> MemoryRecorder {
    AuditRecorder::new(
        Arc::clone(&board.logs),
        Arc::clone(&board.directory),
        Arc::clone(&board.hub),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_appends_one_populated_record(board: BoardHarness) {
    let actor = register_user(&board, 7, "ada");
    let snapshot = TaskSnapshot::of(&task_named("Audited work"));

    let populated = recorder(&board)
        .record(actor, ActionKind::Create, snapshot.clone())
        .await
        .expect("record should succeed");

    assert_eq!(populated.action, ActionKind::Create);
    assert_eq!(
        populated.user.as_ref().map(UserProfile::username),
        Some("ada")
    );
    assert_eq!(populated.task, snapshot);

    let stored = board.logs.recent(10).await.expect("recent should succeed");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.first().map(|log| log.actor), Some(actor));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_pushes_the_populated_record_to_subscribers(board: BoardHarness) {
    let actor = register_user(&board, 7, "ada");
    let mut subscription = board.hub.subscribe();

    let populated = recorder(&board)
        .record(actor, ActionKind::Delete, TaskSnapshot::of(&task_named("Gone")))
        .await
        .expect("record should succeed");

    let event = subscription.try_recv().expect("subscriber should see the log");
    assert_eq!(event, BoardEvent::LogUpdate(populated));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_actor_populates_as_none(board: BoardHarness) {
    let stranger = UserId::new();

    let populated = recorder(&board)
        .record(
            stranger,
            ActionKind::Update,
            TaskSnapshot::of(&task_named("Orphan action")),
        )
        .await
        .expect("record should succeed");

    assert!(populated.user.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_returns_newest_first_up_to_the_limit(board: BoardHarness) {
    let actor = register_user(&board, 7, "ada");
    let audit = recorder(&board);
    for ordinal in 0..4 {
        audit
            .record(
                actor,
                ActionKind::Update,
                TaskSnapshot::of(&task_named(&format!("Step {ordinal}"))),
            )
            .await
            .expect("record should succeed");
    }

    let recent = audit.recent(3).await.expect("recent should succeed");

    assert_eq!(recent.len(), 3);
    assert_eq!(
        recent.first().map(|log| log.task.title.as_str().to_owned()),
        Some("Step 3".to_owned())
    );
    assert_eq!(
        recent.last().map(|log| log.task.title.as_str().to_owned()),
        Some("Step 1".to_owned())
    );
}
