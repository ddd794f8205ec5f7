//! `PostgreSQL` audit record store.

use super::{
    models::{ActionLogRow, NewActionLogRow},
    schema::action_logs,
    task_store::BoardPgPool,
};
use crate::board::{
    domain::{ActionKind, ActionLog, LogId, TaskSnapshot, UserId},
    ports::{ActionLogStore, ActionLogStoreError, ActionLogStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed action log store.
#[derive(Debug, Clone)]
pub struct PostgresActionLogStore {
    pool: BoardPgPool,
}

impl PostgresActionLogStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActionLogStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActionLogStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActionLogStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActionLogStoreError::persistence)?
    }
}

#[async_trait]
impl ActionLogStore for PostgresActionLogStore {
    async fn append(&self, log: &ActionLog) -> ActionLogStoreResult<()> {
        let row = NewActionLogRow {
            id: log.id.into_inner(),
            user_id: log.actor.into_inner(),
            action: log.action.as_str().to_owned(),
            timestamp: log.timestamp,
            task: serde_json::to_value(&log.task).map_err(ActionLogStoreError::persistence)?,
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(action_logs::table)
                .values(&row)
                .execute(connection)
                .map_err(ActionLogStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn recent(&self, limit: usize) -> ActionLogStoreResult<Vec<ActionLog>> {
        let row_limit = i64::try_from(limit).map_err(ActionLogStoreError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = action_logs::table
                .order(action_logs::timestamp.desc())
                .limit(row_limit)
                .select(ActionLogRow::as_select())
                .load::<ActionLogRow>(connection)
                .map_err(ActionLogStoreError::persistence)?;
            rows.into_iter().map(row_to_log).collect()
        })
        .await
    }
}

fn row_to_log(row: ActionLogRow) -> ActionLogStoreResult<ActionLog> {
    let ActionLogRow {
        id,
        user_id,
        action,
        timestamp,
        task,
    } = row;

    Ok(ActionLog {
        id: LogId::from_uuid(id),
        actor: UserId::from_uuid(user_id),
        action: ActionKind::try_from(action.as_str()).map_err(ActionLogStoreError::persistence)?,
        timestamp,
        task: serde_json::from_value::<TaskSnapshot>(task)
            .map_err(ActionLogStoreError::persistence)?,
    })
}
