mod adapters;
mod app_state;
mod config;
mod domain;
mod repositories;
mod router;
mod routes;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt::time::UtcTime, EnvFilter};

use crate::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_timer(UtcTime::rfc_3339())
        .init();

    let settings = config::read_config().context("failed to read configuration")?;

    let app_state = match &settings.database {
        Some(database) => {
            let pool = PgPoolOptions::new()
                .connect_with(database.with_db())
                .await
                .context("failed to connect to database")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;

            tracing::info!(
                host = %database.host,
                database = %database.database_name,
                "using PostgreSQL storage"
            );
            AppState::postgres(pool)
        }
        None => {
            tracing::warn!("no database configured, habits are kept in memory");
            AppState::in_memory()
        }
    };

    if settings.application.seed_challenges {
        app_state
            .challenge_service
            .seed_default_challenges()
            .await
            .context("failed to seed challenges")?;
    }

    let app = router::create(app_state, &settings.application);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
