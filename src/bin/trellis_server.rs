//! Trellis board API server.
//!
//! Wires storage adapters, the fan-out hub, and the HTTP router.
//! `DATABASE_URL` selects the `PostgreSQL` adapters; without it the
//! server runs entirely on in-memory storage, which is useful for
//! demos and local experiments.
//!
//! The external auth middleware is expected to terminate credentials
//! in front of this process and stamp each request with a resolved
//! identity extension; unauthenticated board requests receive 401.

use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trellis::board::adapters::memory::{
    InMemoryActionLogStore, InMemoryTaskStore, InMemoryUserDirectory,
};
use trellis::board::adapters::postgres::{
    BoardPgPool, PostgresActionLogStore, PostgresTaskStore, PostgresUserDirectory,
};
use trellis::board::ports::{ActionLogStore, TaskStore, UserDirectory};
use trellis::http::{AppState, build_router};
use trellis::realtime::BoardEventHub;

/// Command-line configuration.
#[derive(Debug, Parser)]
#[command(name = "trellis-server", about = "Real-time task board API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// `PostgreSQL` connection string; in-memory storage when unset.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Errors that can occur while starting the server.
#[derive(Debug, Error)]
enum ServerError {
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let clock = Arc::new(DefaultClock);
    let hub = Arc::new(BoardEventHub::new());

    match args.database_url {
        Some(url) => {
            let pool: BoardPgPool =
                Pool::builder().build(ConnectionManager::<PgConnection>::new(url))?;
            info!("serving with PostgreSQL storage");
            let state = AppState::new(
                Arc::new(PostgresTaskStore::new(pool.clone(), Arc::clone(&clock))),
                Arc::new(PostgresActionLogStore::new(pool.clone())),
                Arc::new(PostgresUserDirectory::new(pool)),
                hub,
                clock,
            );
            run(state, args.bind).await
        }
        None => {
            info!("serving with in-memory storage");
            let state = AppState::new(
                Arc::new(InMemoryTaskStore::new(Arc::clone(&clock))),
                Arc::new(InMemoryActionLogStore::new()),
                Arc::new(InMemoryUserDirectory::new()),
                hub,
                clock,
            );
            run(state, args.bind).await
        }
    }
}

async fn run<S, L, D>(
    state: AppState<S, L, D, DefaultClock>,
    bind: SocketAddr,
) -> Result<(), ServerError>
where
    S: TaskStore + 'static,
    L: ActionLogStore + 'static,
    D: UserDirectory + 'static,
{
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("task board API listening on http://{bind}");
    axum::serve(listener, router).await?;
    Ok(())
}
