// core/src/query/pagination.rs
use serde::Serialize;

use crate::model::Product;

/// Page metadata returned alongside listed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub total_products: u64,
  pub total_pages: u64,
  pub current_page: u32,
  pub page_size: u32,
  pub has_next_page: bool,
  pub has_prev_page: bool,
}

impl Pagination {
  /// `limit` is at least 1 once validated; a zero limit is treated as 1.
  pub fn new(total_products: u64, page: u32, limit: u32) -> Self {
    let per_page = u64::from(limit.max(1));
    let total_pages = total_products.div_ceil(per_page);
    Self {
      total_products,
      total_pages,
      current_page: page,
      page_size: limit,
      has_next_page: u64::from(page) < total_pages,
      has_prev_page: page > 1,
    }
  }
}

/// One page of products with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
  pub products: Vec<Product>,
  pub pagination: Pagination,
}
