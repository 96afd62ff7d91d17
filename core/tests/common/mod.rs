// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use catalog::{
  MemoryProductStore, NewProduct, Product, ProductCatalogService, ProductChanges, ProductQuery, ProductStore,
  StoreError, StoreResult,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};
use tracing::Level;
use uuid::Uuid;

// --- Service Builders ---

pub fn memory_service() -> (ProductCatalogService, Arc<MemoryProductStore>) {
  let store = Arc::new(MemoryProductStore::new());
  let service = ProductCatalogService::new(store.clone());
  (service, store)
}

pub fn failing_service() -> (ProductCatalogService, Arc<FailingStore>) {
  let store = Arc::new(FailingStore::default());
  (ProductCatalogService::new(store.clone()), store)
}

// --- Fixtures ---

pub fn product_body(name: &str, price: f64, quantity: i64) -> Value {
  json!({ "name": name, "price": price, "quantity": quantity })
}

pub fn new_product(name: &str, price: i64) -> NewProduct {
  NewProduct {
    name: name.to_string(),
    price: Decimal::from(price),
    quantity: 1,
    image: None,
  }
}

/// Inserts `count` products named `Product 1..=count` priced 1..=count, oldest first.
pub async fn seed(store: &MemoryProductStore, count: usize) -> Vec<Product> {
  let mut rows = Vec::with_capacity(count);
  for i in 1..=count {
    let row = store
      .insert(&new_product(&format!("Product {}", i), i as i64))
      .await
      .expect("memory insert cannot fail");
    rows.push(row);
  }
  rows
}

pub fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
  pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

// --- A store whose backend is always down ---

#[derive(Debug, Default)]
pub struct FailingStore {
  pub calls: AtomicUsize,
}

impl FailingStore {
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  fn fail<T>(&self) -> StoreResult<T> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Err(StoreError::Other(anyhow::anyhow!(
      "connection to 10.0.0.5:5432 refused (password authentication failed for user \"catalog\")"
    )))
  }
}

#[async_trait]
impl ProductStore for FailingStore {
  async fn count(&self, _query: &ProductQuery) -> StoreResult<u64> {
    self.fail()
  }
  async fn fetch_page(&self, _query: &ProductQuery) -> StoreResult<Vec<Product>> {
    self.fail()
  }
  async fn find(&self, _id: Uuid) -> StoreResult<Option<Product>> {
    self.fail()
  }
  async fn insert(&self, _product: &NewProduct) -> StoreResult<Product> {
    self.fail()
  }
  async fn update(&self, _id: Uuid, _changes: &ProductChanges) -> StoreResult<Option<Product>> {
    self.fail()
  }
  async fn delete(&self, _id: Uuid) -> StoreResult<Option<Product>> {
    self.fail()
  }
  async fn ping(&self) -> StoreResult<()> {
    self.fail()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Log capture for asserting on emitted levels ---

#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
  pub fn contents(&self) -> String {
    String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
  }

  pub fn lines_at(&self, level: &str) -> usize {
    self.contents().lines().filter(|line| line.contains(level)).count()
  }

  /// A plain-text subscriber writing every event into this capture.
  pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
    let writer = self.clone();
    tracing_subscriber::fmt()
      .with_max_level(Level::TRACE)
      .with_ansi(false)
      .with_writer(move || writer.clone())
      .finish()
  }
}

impl std::io::Write for LogCapture {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}
