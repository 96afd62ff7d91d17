// tests/pg_store_tests.rs
//! Runs the catalog against a real Postgres. Skipped unless `DATABASE_URL` is set.
mod common;

use catalog::{CatalogError, PgProductStore, ProductCatalogService};
use common::*;
use rust_decimal::Decimal;
use serde_json::json;
use serial_test::serial;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS products (
  id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
  name VARCHAR(100) NOT NULL,
  price NUMERIC NOT NULL,
  quantity INTEGER NOT NULL,
  image TEXT,
  created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
  updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

async fn pg_service() -> Option<(ProductCatalogService, PgPool)> {
  let Ok(url) = std::env::var("DATABASE_URL") else {
    eprintln!("DATABASE_URL not set; skipping Postgres store test.");
    return None;
  };
  let pool = PgPoolOptions::new()
    .max_connections(2)
    .connect(&url)
    .await
    .expect("connect to DATABASE_URL");
  sqlx::query(CREATE_TABLE).execute(&pool).await.expect("create products table");
  Some((ProductCatalogService::new(Arc::new(PgProductStore::new(pool.clone()))), pool))
}

#[tokio::test]
#[serial]
async fn test_postgres_lifecycle_through_service() {
  setup_tracing();
  let Some((service, pool)) = pg_service().await else {
    return;
  };
  // unique token so rows from other runs never match the filters below
  let tag = Uuid::new_v4().simple().to_string();

  let lamp = service
    .create_product(&json!({
      "name": format!("Lamp {}", tag),
      "price": 19.99,
      "quantity": 2,
      "image": "https://img.test/lamp.png"
    }))
    .await
    .unwrap();
  assert_eq!(lamp.price, Decimal::from_str("19.99").unwrap());
  assert_eq!(lamp.image.as_deref(), Some("https://img.test/lamp.png"));

  let fetched = service.get_product(&lamp.id.to_string()).await.unwrap();
  assert_eq!(fetched, lamp);

  tokio::time::sleep(Duration::from_millis(5)).await;
  let updated = service
    .update_product(&lamp.id.to_string(), &json!({ "quantity": 5 }))
    .await
    .unwrap();
  assert_eq!(updated.quantity, 5);
  assert_eq!(updated.name, lamp.name);
  assert_eq!(updated.price, lamp.price);
  assert_eq!(updated.image, lamp.image);
  assert_eq!(updated.created_at, lamp.created_at);
  assert!(updated.updated_at > lamp.updated_at);

  let shade = service
    .create_product(&product_body(&format!("Shade {}", tag), 5.0, 1))
    .await
    .unwrap();

  let upper = tag.to_uppercase();
  let all = service.list_products(&query(&[("name", upper.as_str())])).await.unwrap();
  assert_eq!(all.pagination.total_products, 2);
  assert_eq!(all.products[0].id, shade.id);
  assert_eq!(all.products[1].id, lamp.id);

  let filtered = service
    .list_products(&query(&[("name", tag.as_str()), ("minPrice", "10"), ("limit", "1")]))
    .await
    .unwrap();
  assert_eq!(filtered.pagination.total_products, 1);
  assert_eq!(filtered.pagination.total_pages, 1);
  assert_eq!(filtered.products, vec![updated.clone()]);

  let second_page = service
    .list_products(&query(&[("name", tag.as_str()), ("limit", "1"), ("page", "2")]))
    .await
    .unwrap();
  assert_eq!(second_page.products.len(), 1);
  assert_eq!(second_page.products[0].id, lamp.id);
  assert!(second_page.pagination.has_prev_page);

  let deleted = service.delete_product(&lamp.id.to_string()).await.unwrap();
  assert_eq!(deleted, updated);
  service.delete_product(&shade.id.to_string()).await.unwrap();

  for result in [
    service.get_product(&lamp.id.to_string()).await,
    service.update_product(&shade.id.to_string(), &json!({ "price": 1 })).await,
    service.delete_product(&shade.id.to_string()).await,
  ] {
    assert!(matches!(result, Err(CatalogError::NotFound { .. })), "{:?}", result);
  }

  service.health().await.unwrap();
  pool.close().await;
}
