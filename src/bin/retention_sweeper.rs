//! Runs the retention sweep against `PostgreSQL` until interrupted.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/todos retention_sweeper
//! ```
//!
//! Variables may also come from a `.env` file in the working directory. The
//! first sweep runs at the next local midnight and then every
//! `SWEEP_INTERVAL_HOURS` hours. Ctrl+C or SIGTERM cancels the pending timer
//! and exits once any in-flight sweep has finished.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use todo_keeper::config::EngineConfig;
use todo_keeper::retention::RetentionSweeper;
use todo_keeper::todo::adapters::postgres::PostgresTodoRepository;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_keeper=info,retention_sweeper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(error) = dotenv_result {
        tracing::debug!(%error, "no .env file loaded");
    }

    let config = EngineConfig::from_env()?;
    tracing::info!(
        pool_size = config.pool_size,
        sweep_interval_hours = config.sweep_interval_hours,
        "configuration loaded"
    );

    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = Pool::builder().max_size(config.pool_size).build(manager)?;

    let sweeper = RetentionSweeper::new(
        Arc::new(PostgresTodoRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let handle = config.sweep_schedule().spawn(sweeper);

    shutdown_signal().await;
    handle.shutdown().await?;
    tracing::info!("retention sweeper stopped");
    Ok(())
}

/// Completes on Ctrl+C, or on SIGTERM where supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
