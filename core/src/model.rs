// core/src/model.rs

//! Records stored in and produced from the `products` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted product row.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub quantity: i32,
  pub image: Option<String>, // NULL when no image was supplied
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Validated creation input. Id and timestamps are assigned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub name: String,
  pub price: Decimal,
  pub quantity: i32,
  pub image: Option<String>,
}

/// Validated partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
  pub name: Option<String>,
  pub price: Option<Decimal>,
  pub quantity: Option<i32>,
  pub image: Option<String>,
}

impl ProductChanges {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.price.is_none() && self.quantity.is_none() && self.image.is_none()
  }

  /// Applies the present fields to `product`. Timestamps are left to the caller.
  pub fn apply_to(&self, product: &mut Product) {
    if let Some(name) = &self.name {
      product.name = name.clone();
    }
    if let Some(price) = self.price {
      product.price = price;
    }
    if let Some(quantity) = self.quantity {
      product.quantity = quantity;
    }
    if let Some(image) = &self.image {
      product.image = Some(image.clone());
    }
  }
}

/// Primary key taken from a validated path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
  pub fn into_inner(self) -> Uuid {
    self.0
  }
}

impl std::fmt::Display for ProductId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Validated list query: pagination plus optional filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
  pub page: u32,
  pub limit: u32,
  pub name: Option<String>,
  pub min_price: Option<Decimal>,
  pub max_price: Option<Decimal>,
}

impl Default for ListParams {
  fn default() -> Self {
    Self {
      page: DEFAULT_PAGE,
      limit: DEFAULT_LIMIT,
      name: None,
      min_price: None,
      max_price: None,
    }
  }
}
