//! # Tickbox API Server
//!
//! HTTP API for the Tickbox todo service:
//! - Account signup with OTP email verification
//! - JWT sign-in and token issuance
//! - Per-user todo CRUD with daily/weekly/monthly due-date filters
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tickbox-api
//! ```

use std::sync::Arc;

use tickbox_api::{
    app::{build_router, AppState},
    config::Config,
};
use tickbox_shared::{
    db::{create_pool, run_migrations, DatabaseConfig},
    mail::{LogMailer, Mailer, SmtpMailer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickbox_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Tickbox API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(
            smtp.host.clone(),
            smtp.port,
            smtp.username.clone(),
            smtp.password.clone(),
            smtp.from_email.clone(),
            smtp.from_name.clone(),
        )),
        None => {
            tracing::warn!("SMTP_HOST not set, OTP codes will be written to the log");
            Arc::new(LogMailer)
        }
    };

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config, mailer);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to install shutdown signal handler");
    }
}
