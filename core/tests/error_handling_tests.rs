// tests/error_handling_tests.rs
mod common;

use catalog::{CatalogError, InputKind, StoreError};
use common::*;
use serde_json::json;
use serial_test::serial;
use tracing::instrument::WithSubscriber;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_storage_failures_surface_as_storage_errors() {
  setup_tracing();
  let (service, store) = failing_service();
  let id = Uuid::new_v4().to_string();

  let results = vec![
    service.list_products(&query(&[])).await.map(|_| ()),
    service.get_product(&id).await.map(|_| ()),
    service.create_product(&product_body("Desk", 10.0, 1)).await.map(|_| ()),
    service.update_product(&id, &json!({ "quantity": 2 })).await.map(|_| ()),
    service.delete_product(&id).await.map(|_| ()),
    service.health().await,
  ];

  for result in results {
    match result {
      Err(CatalogError::Storage(StoreError::Other(_))) => {}
      other => panic!("Expected CatalogError::Storage, got {:?}", other),
    }
  }
  // list may stop after the first failed statement of its pair
  assert!(store.calls() >= 6);
}

#[tokio::test]
#[serial]
async fn test_not_found_is_distinct_from_storage_failure() {
  setup_tracing();
  let (service, _store) = memory_service();
  let id = Uuid::new_v4();

  match service.get_product(&id.to_string()).await {
    Err(CatalogError::NotFound { id: missing }) => assert_eq!(missing, id),
    other => panic!("Expected NotFound, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_client_errors_log_once_at_warn() {
  let (service, _store) = memory_service();
  let logs = LogCapture::default();

  async {
    assert!(service.get_product("not-a-uuid").await.unwrap_err().is_validation());
    assert!(service.get_product(&Uuid::new_v4().to_string()).await.unwrap_err().is_not_found());
    assert!(service.list_products(&query(&[("limit", "0")])).await.is_err());
  }
  .with_subscriber(logs.subscriber())
  .await;

  assert_eq!(logs.lines_at("WARN"), 3, "logs:\n{}", logs.contents());
  assert_eq!(logs.lines_at("ERROR"), 0, "logs:\n{}", logs.contents());
}

#[tokio::test]
#[serial]
async fn test_storage_failures_log_at_error() {
  let (service, _store) = failing_service();
  let logs = LogCapture::default();

  let result = service.get_product(&Uuid::new_v4().to_string()).with_subscriber(logs.subscriber()).await;

  assert!(matches!(result, Err(CatalogError::Storage(_))));
  assert_eq!(logs.lines_at("ERROR"), 1, "logs:\n{}", logs.contents());
}

#[test]
fn test_input_kind_messages() {
  assert_eq!(InputKind::Query.message(), "Invalid query parameters");
  assert_eq!(InputKind::Params.message(), "Invalid URL parameters");
  assert_eq!(InputKind::Body.message(), "Invalid request body");
}

#[tokio::test]
async fn test_validation_error_display_lists_violations() {
  let (service, _store) = memory_service();
  let err = service
    .create_product(&json!({ "name": "", "price": 0, "quantity": 1 }))
    .await
    .unwrap_err();
  assert_eq!(
    err.to_string(),
    "Invalid request body: name: Name is required; price: Price must be positive"
  );
}
