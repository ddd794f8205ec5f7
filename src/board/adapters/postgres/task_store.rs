//! `PostgreSQL` task store.
//!
//! The version-checked write runs as a read-then-conditional-write
//! inside a transaction: the `UPDATE` is keyed on both the identifier
//! and the version that was read, so a concurrent writer landing in
//! between changes zero rows and the stale caller receives the
//! authoritative record as a conflict.

use super::{
    models::{TaskRecord, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{
        PersistedTaskData, Task, TaskChanges, TaskId, TaskPriority, TaskStatus, TaskTitle, UserId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::Clock;
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug)]
pub struct PostgresTaskStore<C> {
    pool: BoardPgPool,
    clock: Arc<C>,
}

impl<C> Clone for PostgresTaskStore<C> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl From<DieselError> for TaskStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl<C> PostgresTaskStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl<C> TaskStore for PostgresTaskStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn create(&self, task: &Task) -> TaskStoreResult<()> {
        let record = to_record(task)?;
        let title = task.title().as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTitle(title.clone())
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| load_task(connection, id)).await
    }

    async fn find_by_title(&self, title: &str) -> TaskStoreResult<Option<Task>> {
        let wanted = title.to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::title.eq(&wanted))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, title: Option<&str>) -> TaskStoreResult<Vec<Task>> {
        let wanted = title.map(str::to_owned);
        self.run_blocking(move |connection| {
            let mut query = tasks::table.into_boxed();
            if let Some(filter_title) = wanted {
                query = query.filter(tasks::title.eq(filter_title));
            }
            let rows = query
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
        expected_version: Option<u64>,
    ) -> TaskStoreResult<Task> {
        let patch = changes.clone();
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction::<Task, TaskStoreError, _>(|txn| {
                let stored = load_task(txn, id)?.ok_or(TaskStoreError::NotFound(id))?;
                if expected_version.is_some_and(|expected| expected != stored.version()) {
                    return Err(TaskStoreError::VersionConflict {
                        current: Box::new(stored),
                    });
                }

                let read_version = to_row_version(stored.version())?;
                let mut updated = stored;
                updated.apply(&patch, &*clock);
                let record = to_record(&updated)?;

                let affected = diesel::update(
                    tasks::table
                        .filter(tasks::id.eq(id.into_inner()))
                        .filter(tasks::version.eq(read_version)),
                )
                .set(&record)
                .execute(txn)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTitle(updated.title().as_str().to_owned())
                    }
                    _ => TaskStoreError::persistence(err),
                })?;

                if affected == 0 {
                    // Another writer landed between the read and the
                    // conditional write; surface its record.
                    let current = load_task(txn, id)?.ok_or(TaskStoreError::NotFound(id))?;
                    return Err(TaskStoreError::VersionConflict {
                        current: Box::new(current),
                    });
                }
                Ok(updated)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<Task, TaskStoreError, _>(|txn| {
                let stored = load_task(txn, id)?.ok_or(TaskStoreError::NotFound(id))?;
                diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .execute(txn)
                    .map_err(TaskStoreError::persistence)?;
                Ok(stored)
            })
        })
        .await
    }

    async fn count_active_assigned(&self, user: UserId) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::assigned_user.eq(user.into_inner()))
                .filter(tasks::status.ne(TaskStatus::Done.column_name()))
                .count()
                .get_result(connection)
                .map_err(TaskStoreError::persistence)?;
            u64::try_from(count).map_err(TaskStoreError::persistence)
        })
        .await
    }
}

fn load_task(connection: &mut PgConnection, id: TaskId) -> TaskStoreResult<Option<Task>> {
    let row = tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskStoreError::persistence)?;
    row.map(row_to_task).transpose()
}

fn to_row_version(version: u64) -> TaskStoreResult<i64> {
    i64::try_from(version).map_err(TaskStoreError::persistence)
}

fn to_record(task: &Task) -> TaskStoreResult<TaskRecord> {
    Ok(TaskRecord {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        assigned_user: task.assigned_user().map(UserId::into_inner),
        status: task.status().column_name().to_owned(),
        priority: task.priority().as_str().to_owned(),
        updated_at: task.updated_at(),
        version: to_row_version(task.version())?,
    })
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        assigned_user,
        status,
        priority,
        updated_at,
        version,
    } = row;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskStoreError::persistence)?,
        description,
        assigned_user: assigned_user.map(UserId::from_uuid),
        status: TaskStatus::try_from(status.as_str()).map_err(TaskStoreError::persistence)?,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskStoreError::persistence)?,
        updated_at,
        version: u64::try_from(version).map_err(TaskStoreError::persistence)?,
    }))
}
