// core/src/query/builder.rs
use rust_decimal::Decimal;

use crate::model::{ListParams, Product};

pub const PRODUCTS_TABLE: &str = products_table!();
pub const PRODUCT_COLUMNS: &str = product_columns!();

/// A literal bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
  Text(String),
  Decimal(Decimal),
  BigInt(i64),
}

/// The typed form of the active filters, for backends that do not speak SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCriteria {
  pub name_contains: Option<String>,
  pub min_price: Option<Decimal>,
  pub max_price: Option<Decimal>,
}

impl ProductCriteria {
  /// Same semantics as the SQL predicates: case-insensitive substring, inclusive bounds.
  pub fn matches(&self, product: &Product) -> bool {
    if let Some(needle) = &self.name_contains {
      if !product.name.to_lowercase().contains(&needle.to_lowercase()) {
        return false;
      }
    }
    if self.min_price.is_some_and(|min| product.price < min) {
      return false;
    }
    if self.max_price.is_some_and(|max| product.price > max) {
      return false;
    }
    true
  }
}

/// Immutable accumulator of WHERE predicates and their parallel parameter list.
///
/// Each `with_*` call consumes the filter and returns a new one whose next
/// predicate uses the next free placeholder (`$1`, `$2`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
  predicates: Vec<String>,
  params: Vec<SqlParam>,
  criteria: ProductCriteria,
}

impl ProductFilter {
  pub fn new() -> Self {
    Self::default()
  }

  /// Filters from validated list params, in the order name, minPrice, maxPrice.
  pub fn from_params(params: &ListParams) -> Self {
    let mut filter = Self::new();
    if let Some(name) = params.name.as_deref().filter(|n| !n.is_empty()) {
      filter = filter.with_name_containing(name);
    }
    if let Some(min) = params.min_price {
      filter = filter.with_min_price(min);
    }
    if let Some(max) = params.max_price {
      filter = filter.with_max_price(max);
    }
    filter
  }

  #[must_use]
  pub fn with_name_containing(self, name: &str) -> Self {
    let mut next = self.push("name ILIKE", SqlParam::Text(format!("%{}%", escape_like(name))));
    next.criteria.name_contains = Some(name.to_string());
    next
  }

  #[must_use]
  pub fn with_min_price(self, min: Decimal) -> Self {
    let mut next = self.push("price >=", SqlParam::Decimal(min));
    next.criteria.min_price = Some(min);
    next
  }

  #[must_use]
  pub fn with_max_price(self, max: Decimal) -> Self {
    let mut next = self.push("price <=", SqlParam::Decimal(max));
    next.criteria.max_price = Some(max);
    next
  }

  fn push(mut self, column_and_operator: &str, param: SqlParam) -> Self {
    let placeholder = self.params.len() + 1;
    self.predicates.push(format!("{} ${}", column_and_operator, placeholder));
    self.params.push(param);
    self
  }

  /// `WHERE a AND b ...`, or an empty string when no predicate is set.
  pub fn where_clause(&self) -> String {
    if self.predicates.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.predicates.join(" AND "))
    }
  }

  pub fn params(&self) -> &[SqlParam] {
    &self.params
  }

  pub fn criteria(&self) -> &ProductCriteria {
    &self.criteria
  }

  /// Freezes the filter into the count and page statements for one page.
  pub fn build(self, page: u32, limit: u32) -> ProductQuery {
    let where_clause = self.where_clause();
    let where_part = if where_clause.is_empty() {
      String::new()
    } else {
      format!(" {}", where_clause)
    };
    let limit_placeholder = self.params.len() + 1;

    let count_sql = format!("SELECT COUNT(*) FROM {}{}", PRODUCTS_TABLE, where_part);
    let page_sql = format!(
      "SELECT {} FROM {}{} ORDER BY created_at DESC, id DESC LIMIT ${} OFFSET ${}",
      PRODUCT_COLUMNS,
      PRODUCTS_TABLE,
      where_part,
      limit_placeholder,
      limit_placeholder + 1
    );

    ProductQuery {
      count_sql,
      page_sql,
      filter_params: self.params,
      criteria: self.criteria,
      page,
      limit,
    }
  }
}

/// Count and page statements sharing one predicate set.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
  count_sql: String,
  page_sql: String,
  filter_params: Vec<SqlParam>,
  criteria: ProductCriteria,
  page: u32,
  limit: u32,
}

impl ProductQuery {
  pub fn from_params(params: &ListParams) -> Self {
    ProductFilter::from_params(params).build(params.page, params.limit)
  }

  pub fn count_sql(&self) -> &str {
    &self.count_sql
  }

  pub fn page_sql(&self) -> &str {
    &self.page_sql
  }

  /// Parameters for [`count_sql`](Self::count_sql).
  pub fn filter_params(&self) -> &[SqlParam] {
    &self.filter_params
  }

  /// Filter parameters followed by LIMIT and OFFSET, for [`page_sql`](Self::page_sql).
  pub fn page_params(&self) -> Vec<SqlParam> {
    let mut params = self.filter_params.clone();
    params.push(SqlParam::BigInt(self.limit()));
    params.push(SqlParam::BigInt(self.offset()));
    params
  }

  pub fn criteria(&self) -> &ProductCriteria {
    &self.criteria
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn limit(&self) -> i64 {
    i64::from(self.limit)
  }

  pub fn offset(&self) -> i64 {
    i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
  }
}

// `%`, `_` and the escape character itself match literally.
fn escape_like(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for c in raw.chars() {
    if matches!(c, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_filter_has_no_where_clause() {
    let query = ProductFilter::new().build(1, 10);
    assert_eq!(query.count_sql(), "SELECT COUNT(*) FROM products");
    assert_eq!(
      query.page_sql(),
      "SELECT id, name, price, quantity, image, created_at, updated_at FROM products \
       ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
    );
    assert!(query.filter_params().is_empty());
    assert_eq!(query.page_params(), vec![SqlParam::BigInt(10), SqlParam::BigInt(0)]);
  }

  #[test]
  fn escape_like_escapes_wildcards() {
    assert_eq!(escape_like(r"50%_off\"), r"50\%\_off\\");
    assert_eq!(escape_like("plain"), "plain");
  }

  #[test]
  fn offset_follows_page_and_limit() {
    assert_eq!(ProductFilter::new().build(1, 10).offset(), 0);
    assert_eq!(ProductFilter::new().build(3, 25).offset(), 50);
  }

  #[test]
  fn builder_is_a_value() {
    let base = ProductFilter::new().with_min_price(Decimal::ONE);
    let narrowed = base.clone().with_max_price(Decimal::TEN);
    assert_eq!(base.params().len(), 1);
    assert_eq!(narrowed.params().len(), 2);
    assert_eq!(base.where_clause(), "WHERE price >= $1");
  }
}
