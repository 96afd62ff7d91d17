// server/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod state;
mod web;

use crate::config::{AppConfig, LogFormat, StorageBackend};
use crate::errors::AppError;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use anyhow::Context;
use catalog::{MemoryProductStore, PgProductStore, ProductCatalogService, ProductStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

/// Opens the configured backend. The Postgres store is also returned on its own
/// so its pool can be closed after the server stops.
async fn open_store(app_config: &AppConfig) -> anyhow::Result<(Arc<dyn ProductStore>, Option<PgProductStore>)> {
  match app_config.storage_backend {
    StorageBackend::Postgres => {
      let options = app_config.database.connect_options()?;
      let pool = PgPoolOptions::new()
        .max_connections(app_config.db_max_connections)
        .acquire_timeout(app_config.db_acquire_timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
          tracing::error!(error = %e, "Failed to connect to the database.");
          AppError::Sqlx(e)
        })
        .context("Database connection error")?;
      tracing::info!("Connected to PostgreSQL database.");
      let store = PgProductStore::new(pool);
      Ok((Arc::new(store.clone()), Some(store)))
    }
    StorageBackend::Memory => {
      tracing::warn!("Using the in-memory product store; data is lost on shutdown.");
      Ok((Arc::new(MemoryProductStore::new()), None))
    }
  }
}

// Main function
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Load application configuration
  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);

  init_tracing(app_config.log_format);
  tracing::info!(config = ?app_config, "Starting product catalog server...");

  let (store, pg_store) = open_store(&app_config).await?;

  // Create AppState
  let app_state = AppState {
    catalog: ProductCatalogService::new(store),
    config: app_config.clone(), // Clone Arc for AppState
  };

  // Configure and Start Actix Web Server
  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  if let Some(pg_store) = pg_store {
    pg_store.close().await;
    tracing::info!("Database pool closed.");
  }
  tracing::info!("Server stopped.");
  Ok(())
}
