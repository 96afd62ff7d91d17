// core/src/lib.rs

//! Catalog: the request-handling core of a product catalog CRUD service.
//!
//! It provides:
//!  - Validation of untyped query maps, path parameters and JSON bodies into
//!    typed records, reporting every field violation at once.
//!  - An immutable filter builder producing matching count and page statements
//!    with positional parameters.
//!  - A `ProductStore` seam with a Postgres backend and an in-memory one.
//!  - `ProductCatalogService`, which ties the three together for the five
//!    operations: list, get, create, update, delete.

// SQL text shared by the query builder and the Postgres statements.
// `concat!` only takes literals, so these are macros.
macro_rules! products_table {
  () => {
    "products"
  };
}

macro_rules! product_columns {
  () => {
    "id, name, price, quantity, image, created_at, updated_at"
  };
}

pub mod error;
pub mod model;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

// --- Re-exports for the Public API ---

pub use crate::error::{
  CatalogError, CatalogResult, FieldViolation, InputKind, StoreError, StoreResult, ValidationErrors,
};
pub use crate::model::{ListParams, NewProduct, Product, ProductChanges, ProductId};
pub use crate::query::{Pagination, ProductFilter, ProductPage, ProductQuery, SqlParam};
pub use crate::service::ProductCatalogService;
pub use crate::store::{MemoryProductStore, PgProductStore, ProductStore};

/*
    Request flow:
    1. The HTTP layer hands the raw query map, path id or JSON body to
       `ProductCatalogService`.
    2. The matching validator either returns a typed record or every violation
       it found; violations stop the request before storage is touched.
    3. For lists, `ProductQuery::from_params` builds the count and page
       statements from one predicate set, and both run concurrently.
    4. Store results come back as `Product` rows, or `None` for a missing id,
       which the service turns into `CatalogError::NotFound`.
*/
