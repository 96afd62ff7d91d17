// server/src/web/mod.rs

// Declare child modules
pub mod handlers;
pub mod routes;

pub use routes::configure_app_routes;

/// State over a fresh in-memory store, for handler tests.
#[cfg(test)]
pub(crate) fn test_state() -> crate::state::AppState {
  use crate::config::AppConfig;
  use catalog::{MemoryProductStore, ProductCatalogService};
  use std::sync::Arc;

  let config = AppConfig::from_lookup(|name| (name == "STORAGE_BACKEND").then(|| "memory".to_string()))
    .expect("memory config needs no other variables");
  crate::state::AppState {
    catalog: ProductCatalogService::new(Arc::new(MemoryProductStore::new())),
    config: Arc::new(config),
  }
}
