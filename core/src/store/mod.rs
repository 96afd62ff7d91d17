// core/src/store/mod.rs

//! Storage accessors for the `products` table.
//!
//! [`ProductStore`] is the seam between the service and the backend. Each
//! method maps to exactly one statement, so every mutation is atomic on its
//! own. "No such row" is reported as `None`, never as an error.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::{NewProduct, Product, ProductChanges};
use crate::query::ProductQuery;

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Number of rows matching the query's predicates, ignoring pagination.
  async fn count(&self, query: &ProductQuery) -> StoreResult<u64>;

  /// One page of matching rows, newest first.
  async fn fetch_page(&self, query: &ProductQuery) -> StoreResult<Vec<Product>>;

  async fn find(&self, id: Uuid) -> StoreResult<Option<Product>>;

  /// Inserts a row and returns it with its generated id and timestamps.
  async fn insert(&self, product: &NewProduct) -> StoreResult<Product>;

  /// Applies present fields, keeps the rest, refreshes `updated_at`.
  async fn update(&self, id: Uuid, changes: &ProductChanges) -> StoreResult<Option<Product>>;

  /// Removes the row and returns its last state.
  async fn delete(&self, id: Uuid) -> StoreResult<Option<Product>>;

  /// Liveness check behind the health endpoint.
  async fn ping(&self) -> StoreResult<()>;
}
