use expense_tracker::core::{AppSettingsGate, AppState, Config};
use expense_tracker::create_router;
use expense_tracker::services::warm_up_dummy_hash;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG ha la precedenza, altrimenti livello info
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // Inizializza la configurazione
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    config.print_info();

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    info!("Database migrations applied");

    warm_up_dummy_hash().await.map_err(|e| {
        error!("Failed to prepare password hashing: {}", e.status());
        format!("startup failed: {}", e.status())
    })?;

    let state = AppState::new(pool.clone(), config.jwt_secret.clone())
        .with_registration_gate(Arc::new(AppSettingsGate::new(
            pool,
            config.sign_up_allowed,
        )))
        .with_token_ttl(chrono::Duration::hours(config.jwt_ttl_hours));

    // Crea il router
    let app = create_router(Arc::new(state));

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    // Avvia il server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
