//! Domain-focused tests for titles, enums, and the task aggregate.

use crate::board::domain::{
    ActionKind, ActionLog, BoardDomainError, Task, TaskChanges, TaskPriority, TaskSnapshot,
    TaskStatus, TaskTitle, UserId, UserProfile,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn title_rejects_empty_value() {
    assert_eq!(TaskTitle::new(""), Err(BoardDomainError::EmptyTitle));
}

#[rstest]
#[case("Todo")]
#[case("In Progress")]
#[case("Done")]
fn title_rejects_column_names(#[case] reserved: &str) {
    assert_eq!(
        TaskTitle::new(reserved),
        Err(BoardDomainError::ReservedTitle(reserved.to_owned()))
    );
}

#[rstest]
#[case("todo")]
#[case("done ")]
#[case("Ship the release")]
fn title_accepts_non_reserved_values(#[case] value: &str) {
    let title = TaskTitle::new(value).expect("title should be accepted");
    assert_eq!(title.as_str(), value);
}

#[rstest]
fn status_round_trips_through_column_names() {
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::try_from(status.column_name()), Ok(status));
    }
}

#[rstest]
fn status_rejects_unknown_labels() {
    assert!(TaskStatus::try_from("Archived").is_err());
    assert!(TaskPriority::try_from("Urgent").is_err());
    assert!(ActionKind::try_from("rename").is_err());
}

#[rstest]
fn new_task_starts_at_version_one() {
    let task = Task::new(
        TaskTitle::new("Write release notes").expect("valid title"),
        Some("Cover the changelog".to_owned()),
        None,
        TaskStatus::default(),
        TaskPriority::default(),
        &DefaultClock,
    );

    assert_eq!(task.version(), 1);
    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.description(), Some("Cover the changelog"));
    assert!(task.assigned_user().is_none());
}

#[rstest]
fn apply_with_partial_patch_keeps_absent_fields() {
    let mut task = Task::new(
        TaskTitle::new("Fix login redirect").expect("valid title"),
        Some("Redirect loops on stale cookies".to_owned()),
        Some(UserId::new()),
        TaskStatus::InProgress,
        TaskPriority::High,
        &DefaultClock,
    );
    let before = task.clone();

    task.apply(
        &TaskChanges::new().with_status(TaskStatus::Done),
        &DefaultClock,
    );

    assert_eq!(task.status(), TaskStatus::Done);
    assert_eq!(task.title(), before.title());
    assert_eq!(task.description(), before.description());
    assert_eq!(task.assigned_user(), before.assigned_user());
    assert_eq!(task.priority(), before.priority());
    assert_eq!(task.version(), before.version() + 1);
}

#[rstest]
fn apply_with_full_patch_replaces_every_field() {
    let mut task = Task::new(
        TaskTitle::new("Draft docs").expect("valid title"),
        None,
        None,
        TaskStatus::default(),
        TaskPriority::default(),
        &DefaultClock,
    );
    let assignee = UserId::new();

    task.apply(
        &TaskChanges::new()
            .with_title(TaskTitle::new("Publish docs").expect("valid title"))
            .with_description("Push to the docs site")
            .with_assigned_user(assignee)
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::High),
        &DefaultClock,
    );

    assert_eq!(task.title().as_str(), "Publish docs");
    assert_eq!(task.description(), Some("Push to the docs site"));
    assert_eq!(task.assigned_user(), Some(assignee));
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.priority(), TaskPriority::High);
    assert_eq!(task.version(), 2);
}

#[rstest]
fn snapshot_copies_current_field_values() {
    let task = Task::new(
        TaskTitle::new("Rotate credentials").expect("valid title"),
        Some("Staging first".to_owned()),
        Some(UserId::new()),
        TaskStatus::InProgress,
        TaskPriority::Low,
        &DefaultClock,
    );

    let snapshot = TaskSnapshot::of(&task);

    assert_eq!(snapshot.id, task.id());
    assert_eq!(snapshot.title, *task.title());
    assert_eq!(snapshot.description.as_deref(), task.description());
    assert_eq!(snapshot.assigned_user, task.assigned_user());
    assert_eq!(snapshot.status, task.status());
    assert_eq!(snapshot.priority, task.priority());
    assert_eq!(snapshot.version, task.version());
}

#[rstest]
fn task_serializes_with_wire_field_names() {
    let task = Task::new(
        TaskTitle::new("Wire check").expect("valid title"),
        None,
        Some(UserId::new()),
        TaskStatus::InProgress,
        TaskPriority::default(),
        &DefaultClock,
    );

    let value = serde_json::to_value(&task).expect("task should serialize");

    assert_eq!(value["status"], "In Progress");
    assert!(value.get("assignedUser").is_some());
    assert!(value.get("updatedAt").is_some());
    assert_eq!(value["version"], 1);
}

#[rstest]
fn populated_log_embeds_actor_profile() {
    let actor = UserId::new();
    let task = Task::new(
        TaskTitle::new("Audit me").expect("valid title"),
        None,
        None,
        TaskStatus::default(),
        TaskPriority::default(),
        &DefaultClock,
    );
    let log = ActionLog::new(actor, ActionKind::Create, TaskSnapshot::of(&task), &DefaultClock);
    let log_id = log.id;

    let populated = log.populate(Some(UserProfile::new(actor, "ada", "ada@example.com")));

    assert_eq!(populated.id, log_id);
    assert_eq!(populated.action, ActionKind::Create);
    assert_eq!(
        populated.user.as_ref().map(UserProfile::username),
        Some("ada")
    );
    assert_eq!(populated.task.title.as_str(), "Audit me");
}
