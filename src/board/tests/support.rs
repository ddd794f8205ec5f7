//! Shared fixtures for board tests.

use std::sync::Arc;

use crate::board::adapters::memory::{
    InMemoryActionLogStore, InMemoryTaskStore, InMemoryUserDirectory,
};
use crate::board::domain::{Task, TaskPriority, TaskStatus, TaskTitle, UserId, UserProfile};
use crate::board::services::TaskMutationService;
use crate::realtime::BoardEventHub;
use mockable::DefaultClock;
use uuid::Uuid;

/// In-memory wiring of the full mutation stack.
pub struct BoardHarness {
    pub store: Arc<InMemoryTaskStore<DefaultClock>>,
    pub logs: Arc<InMemoryActionLogStore>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub hub: Arc<BoardEventHub>,
    pub service: MemoryMutationService,
}

pub type MemoryMutationService = TaskMutationService<
    InMemoryTaskStore<DefaultClock>,
    InMemoryActionLogStore,
    InMemoryUserDirectory,
    BoardEventHub,
    DefaultClock,
>;

pub fn harness() -> BoardHarness {
    let clock = Arc::new(DefaultClock);
    let store = Arc::new(InMemoryTaskStore::new(Arc::clone(&clock)));
    let logs = Arc::new(InMemoryActionLogStore::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    let hub = Arc::new(BoardEventHub::new());
    let service = TaskMutationService::new(
        Arc::clone(&store),
        Arc::clone(&logs),
        Arc::clone(&directory),
        Arc::clone(&hub),
        clock,
    );
    BoardHarness {
        store,
        logs,
        directory,
        hub,
        service,
    }
}

/// Registers a user under a fixed identifier so id-ordered tie-breaks
/// are predictable in tests.
pub fn register_user(harness: &BoardHarness, ordinal: u128, username: &str) -> UserId {
    let id = UserId::from_uuid(Uuid::from_u128(ordinal));
    harness
        .directory
        .insert(UserProfile::new(
            id,
            username,
            format!("{username}@example.com"),
        ))
        .expect("user registration should succeed");
    id
}

/// An arbitrary acting user identifier.
pub fn actor() -> UserId {
    UserId::new()
}

/// Builds a standalone task for store-level tests.
pub fn task_named(title: &str) -> Task {
    Task::new(
        TaskTitle::new(title).expect("valid task title"),
        None,
        None,
        TaskStatus::default(),
        TaskPriority::default(),
        &DefaultClock,
    )
}
