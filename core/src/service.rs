// core/src/service.rs

//! The five catalog operations: validate, then touch storage.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::try_join;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult, InputKind, StoreError, ValidationErrors};
use crate::model::{Product, ProductId};
use crate::query::{Pagination, ProductPage, ProductQuery};
use crate::store::ProductStore;
use crate::validation;

/// Product catalog operations over an injected [`ProductStore`].
///
/// Holds no state of its own; clones share the same store.
#[derive(Clone)]
pub struct ProductCatalogService {
  store: Arc<dyn ProductStore>,
}

impl std::fmt::Debug for ProductCatalogService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ProductCatalogService").finish_non_exhaustive()
  }
}

fn rejected(input: InputKind, errors: ValidationErrors) -> CatalogError {
  warn!(input = ?input, violations = %errors, "Rejected invalid input.");
  CatalogError::validation(input, errors)
}

fn storage_failure(operation: &'static str) -> impl FnOnce(StoreError) -> CatalogError {
  move |e| {
    error!(operation, error = %e, "Storage operation failed.");
    CatalogError::Storage(e)
  }
}

fn parse_id(raw: &str) -> CatalogResult<ProductId> {
  validation::validate_product_id(raw).map_err(|e| rejected(InputKind::Params, e))
}

fn not_found(id: ProductId) -> CatalogError {
  warn!(product_id = %id, "Product not found.");
  CatalogError::NotFound { id: id.into_inner() }
}

impl ProductCatalogService {
  pub fn new(store: Arc<dyn ProductStore>) -> Self {
    Self { store }
  }

  /// Lists one page of products matching the optional filters.
  ///
  /// The count and page statements run concurrently over the same predicates.
  #[instrument(name = "catalog::list_products", skip_all)]
  pub async fn list_products(&self, query: &HashMap<String, String>) -> CatalogResult<ProductPage> {
    let params = validation::validate_list_params(query).map_err(|e| rejected(InputKind::Query, e))?;
    let product_query = ProductQuery::from_params(&params);

    let (total, products) = try_join(self.store.count(&product_query), self.store.fetch_page(&product_query))
      .await
      .map_err(storage_failure("list"))?;

    let pagination = Pagination::new(total, params.page, params.limit);
    info!(
      total = pagination.total_products,
      page = pagination.current_page,
      returned = products.len(),
      "Listed products."
    );
    Ok(ProductPage { products, pagination })
  }

  #[instrument(name = "catalog::get_product", skip(self))]
  pub async fn get_product(&self, raw_id: &str) -> CatalogResult<Product> {
    let id = parse_id(raw_id)?;
    match self.store.find(id.into_inner()).await.map_err(storage_failure("get"))? {
      Some(product) => {
        info!(product_id = %id, "Product fetched.");
        Ok(product)
      }
      None => Err(not_found(id)),
    }
  }

  #[instrument(name = "catalog::create_product", skip_all)]
  pub async fn create_product(&self, body: &Value) -> CatalogResult<Product> {
    let new_product = validation::validate_new_product(body).map_err(|e| rejected(InputKind::Body, e))?;
    let product = self
      .store
      .insert(&new_product)
      .await
      .map_err(storage_failure("create"))?;
    info!(product_id = %product.id, "Product created.");
    Ok(product)
  }

  /// Applies a partial update. An empty body still refreshes `updated_at`.
  #[instrument(name = "catalog::update_product", skip(self, body))]
  pub async fn update_product(&self, raw_id: &str, body: &Value) -> CatalogResult<Product> {
    let id = parse_id(raw_id)?;
    let changes = validation::validate_product_changes(body).map_err(|e| rejected(InputKind::Body, e))?;
    if changes.is_empty() {
      info!(product_id = %id, "Update carries no field changes.");
    }
    match self
      .store
      .update(id.into_inner(), &changes)
      .await
      .map_err(storage_failure("update"))?
    {
      Some(product) => {
        info!(product_id = %id, "Product updated.");
        Ok(product)
      }
      None => Err(not_found(id)),
    }
  }

  #[instrument(name = "catalog::delete_product", skip(self))]
  pub async fn delete_product(&self, raw_id: &str) -> CatalogResult<Product> {
    let id = parse_id(raw_id)?;
    match self
      .store
      .delete(id.into_inner())
      .await
      .map_err(storage_failure("delete"))?
    {
      Some(product) => {
        info!(product_id = %id, "Product deleted.");
        Ok(product)
      }
      None => Err(not_found(id)),
    }
  }

  /// `Ok` when the backend answers.
  pub async fn health(&self) -> CatalogResult<()> {
    self.store.ping().await.map_err(storage_failure("ping"))
  }
}
