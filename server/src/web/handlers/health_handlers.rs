// server/src/web/handlers/health_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

pub async fn root_handler() -> HttpResponse {
  HttpResponse::Ok().content_type("text/plain; charset=utf-8").body("Server is running")
}

/// Pings the product store; 503 when it does not answer.
pub async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  let storage = app_state.config.storage_backend.as_str();
  match app_state.catalog.health().await {
    Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok", "storage": storage })),
    Err(e) => {
      warn!(error = %e, "Health check failed.");
      HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable", "storage": storage }))
    }
  }
}
