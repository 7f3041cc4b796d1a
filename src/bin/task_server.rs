//! Task tracking HTTP server.
//!
//! Settings come from `TASK_TRACKER__*` environment variables (see
//! [`task_tracker::config`]). Log verbosity follows `RUST_LOG` and defaults
//! to `task_tracker=debug,tower_http=debug`.
//!
//! ```text
//! TASK_TRACKER__STORAGE__BACKEND=postgres \
//! TASK_TRACKER__STORAGE__DATABASE_URL=postgres://localhost/tasks \
//! task_server
//! ```

use task_tracker::config::{Settings, SettingsError, StorageBackend};
use task_tracker::http;
use task_tracker::persistence::{adapters::postgres::build_pool, ports::RepositoryError};
use task_tracker::task::adapters::{memory::InMemoryTaskStore, postgres::PostgresTaskStore};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "task_tracker=debug,tower_http=debug";

/// Errors that stop the server from starting or keep it from running.
#[derive(Debug, Error)]
enum BootstrapError {
    #[error("failed to load settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to prepare storage: {0}")]
    Storage(#[from] RepositoryError),
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BootstrapError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new()?;
    let addr = settings.socket_addr()?;

    let outcome = match settings.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory task storage");
            http::serve(InMemoryTaskStore::new(), addr).await
        }
        StorageBackend::Postgres => {
            let pool = build_pool(settings.database_url()?, settings.storage.pool_size)?;
            let store = PostgresTaskStore::new(pool);
            store.ensure_schema().await?;
            tracing::info!(pool_size = settings.storage.pool_size, "using postgres task storage");
            http::serve(store, addr).await
        }
    };

    outcome.map_err(|err| {
        tracing::error!(error = %err, "task server stopped");
        BootstrapError::Serve(err)
    })
}
