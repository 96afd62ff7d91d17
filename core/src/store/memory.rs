// core/src/store/memory.rs
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::ProductStore;
use crate::error::StoreResult;
use crate::model::{NewProduct, Product, ProductChanges};
use crate::query::ProductQuery;

#[derive(Debug)]
struct Table {
  rows: Vec<Product>,
  // last timestamp handed out; keeps created_at/updated_at strictly increasing
  clock: DateTime<Utc>,
}

/// [`ProductStore`] backed by a locked vector.
///
/// Evaluates the query's typed criteria instead of its SQL, with the same
/// ordering and bounds. The lock is never held across an `.await`.
#[derive(Debug)]
pub struct MemoryProductStore {
  table: RwLock<Table>,
}

impl Default for MemoryProductStore {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryProductStore {
  pub fn new() -> Self {
    Self {
      table: RwLock::new(Table {
        rows: Vec::new(),
        clock: DateTime::<Utc>::MIN_UTC,
      }),
    }
  }

  pub fn len(&self) -> usize {
    self.table.read().rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Table {
  fn tick(&mut self) -> DateTime<Utc> {
    let now = Utc::now();
    self.clock = if now > self.clock {
      now
    } else {
      self.clock + TimeDelta::microseconds(1)
    };
    self.clock
  }

  fn position(&self, id: Uuid) -> Option<usize> {
    self.rows.iter().position(|p| p.id == id)
  }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
  async fn count(&self, query: &ProductQuery) -> StoreResult<u64> {
    let table = self.table.read();
    let total = table.rows.iter().filter(|p| query.criteria().matches(p)).count();
    Ok(total as u64)
  }

  async fn fetch_page(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
    let mut matching: Vec<Product> = {
      let table = self.table.read();
      table
        .rows
        .iter()
        .filter(|p| query.criteria().matches(p))
        .cloned()
        .collect()
    };
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(query.limit()).unwrap_or(0);
    Ok(matching.into_iter().skip(offset).take(limit).collect())
  }

  async fn find(&self, id: Uuid) -> StoreResult<Option<Product>> {
    let table = self.table.read();
    Ok(table.rows.iter().find(|p| p.id == id).cloned())
  }

  async fn insert(&self, product: &NewProduct) -> StoreResult<Product> {
    let mut table = self.table.write();
    let now = table.tick();
    let row = Product {
      id: Uuid::new_v4(),
      name: product.name.clone(),
      price: product.price,
      quantity: product.quantity,
      image: product.image.clone(),
      created_at: now,
      updated_at: now,
    };
    table.rows.push(row.clone());
    Ok(row)
  }

  async fn update(&self, id: Uuid, changes: &ProductChanges) -> StoreResult<Option<Product>> {
    let mut table = self.table.write();
    let Some(index) = table.position(id) else {
      return Ok(None);
    };
    let now = table.tick();
    let row = &mut table.rows[index];
    changes.apply_to(row);
    row.updated_at = now;
    Ok(Some(row.clone()))
  }

  async fn delete(&self, id: Uuid) -> StoreResult<Option<Product>> {
    let mut table = self.table.write();
    Ok(table.position(id).map(|index| table.rows.remove(index)))
  }

  async fn ping(&self) -> StoreResult<()> {
    Ok(())
  }
}
