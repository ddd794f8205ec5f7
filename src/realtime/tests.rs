//! Fan-out hub tests.

use super::{BoardEvent, BoardEventHub};
use crate::board::domain::{Task, TaskPriority, TaskStatus, TaskTitle};
use crate::board::ports::EventBroadcaster;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn hub() -> BoardEventHub {
    BoardEventHub::new()
}

fn task_named(title: &str) -> Task {
    Task::new(
        TaskTitle::new(title).expect("valid task title"),
        None,
        None,
        TaskStatus::default(),
        TaskPriority::default(),
        &DefaultClock,
    )
}

#[rstest]
fn events_carry_their_wire_names(hub: BoardEventHub) {
    let task = task_named("Named event");
    hub.broadcast_task(&task);

    let event = BoardEvent::TaskUpdate(task);
    assert_eq!(event.name(), "taskUpdate");
    let payload = event.payload().expect("payload should serialize");
    assert_eq!(payload["title"], "Named event");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn all_subscribers_see_events_in_broadcast_order(hub: BoardEventHub) {
    let mut near = hub.subscribe();
    let mut far = hub.subscribe();

    let first = task_named("First");
    let second = task_named("Second");
    hub.broadcast_task(&first);
    hub.broadcast_task(&second);

    for subscription in [&mut near, &mut far] {
        assert_eq!(
            subscription.recv().await,
            Some(BoardEvent::TaskUpdate(first.clone()))
        );
        assert_eq!(
            subscription.recv().await,
            Some(BoardEvent::TaskUpdate(second.clone()))
        );
        assert!(subscription.try_recv().is_none());
    }
}

#[rstest]
fn dropped_subscriptions_are_unregistered(hub: BoardEventHub) {
    let kept = hub.subscribe();
    let dropped = hub.subscribe();
    assert_eq!(hub.subscriber_count(), 2);

    drop(dropped);
    assert_eq!(hub.subscriber_count(), 1);
    drop(kept);
    assert_eq!(hub.subscriber_count(), 0);
}

#[rstest]
fn late_subscribers_miss_earlier_events(hub: BoardEventHub) {
    hub.broadcast_task(&task_named("Before anyone connected"));

    let mut subscription = hub.subscribe();
    assert!(subscription.try_recv().is_none());

    hub.broadcast_task(&task_named("After connecting"));
    let event = subscription.try_recv().expect("new event should arrive");
    assert_eq!(event.name(), "taskUpdate");
}
