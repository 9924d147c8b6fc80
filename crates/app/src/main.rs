use std::net::SocketAddr;

use migration::{Migrator, MigratorTrait};
use settings::Database;
use tokio_util::sync::CancellationToken;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let shutdown = CancellationToken::new();
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budget_tracker={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    let addr: SocketAddr = format!("{}:{}", server.bind, server.port).parse()?;
    let db = parse_database(&server.database).await?;
    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await?;

    let server_shutdown = shutdown.clone();
    tasks.spawn(async move {
        if let Err(err) = server::run(engine, db, addr, server_shutdown).await {
            tracing::error!("server failed: {err}");
        }
    });

    let signal_shutdown = shutdown.clone();
    tasks.spawn(async move {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => tracing::info!("Shutdown requested"),
                Err(err) => tracing::error!("failed to listen for ctrl-c: {err}"),
            },
            () = signal_shutdown.cancelled() => {}
        }
        signal_shutdown.cancel();
    });

    // Whichever task ends first (server failure or signal) stops the other.
    if tasks.join_next().await.is_some() {
        shutdown.cancel();
    }
    while tasks.join_next().await.is_some() {}

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("Database ready");
    Ok(database)
}
