// core/src/query/mod.rs

//! Builds the parameterized statements for the list operation.

pub mod builder;
pub mod pagination;

pub use builder::{ProductCriteria, ProductFilter, ProductQuery, SqlParam, PRODUCTS_TABLE, PRODUCT_COLUMNS};
pub use pagination::{Pagination, ProductPage};
