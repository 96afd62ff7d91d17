// server/src/state.rs
use crate::config::AppConfig;
use catalog::ProductCatalogService;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppState {
  pub catalog: ProductCatalogService,
  pub config: Arc<AppConfig>, // Share loaded config
}
