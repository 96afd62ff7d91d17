// core/src/validation/list_query.rs

//! Query-string rules for the list operation. Values arrive as strings and
//! are coerced to numbers where a number is expected.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::decimal_from_str;
use crate::error::ValidationErrors;
use crate::model::{ListParams, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

const NOT_A_NUMBER: &str = "Expected number, received string";
const NOT_AN_INTEGER: &str = "Expected integer, received float";

/// Validates the list query map into [`ListParams`], applying defaults.
///
/// Blank values are treated as absent.
pub fn validate_list_params(query: &HashMap<String, String>) -> Result<ListParams, ValidationErrors> {
  let mut errors = ValidationErrors::new();
  let lookup = |key: &str| query.get(key).map(String::as_str).filter(|v| !v.trim().is_empty());

  let page = lookup("page").and_then(|raw| match coerce_integer(raw) {
    Ok(n) if n < 1 => {
      errors.push("page", "Page must be at least 1");
      None
    }
    Ok(n) => u32::try_from(n).ok().or_else(|| {
      errors.push("page", format!("Page must be at most {}", u32::MAX));
      None
    }),
    Err(message) => {
      errors.push("page", message);
      None
    }
  });

  let limit = lookup("limit").and_then(|raw| match coerce_integer(raw) {
    Ok(n) if n < 1 => {
      errors.push("limit", "Limit must be a positive integer");
      None
    }
    Ok(n) if n > i64::from(MAX_LIMIT) => {
      errors.push("limit", format!("Limit must be at most {}", MAX_LIMIT));
      None
    }
    // bounded by MAX_LIMIT above
    Ok(n) => u32::try_from(n).ok(),
    Err(message) => {
      errors.push("limit", message);
      None
    }
  });

  let min_price = lookup("minPrice").and_then(|raw| read_price(raw, "minPrice", "Min price", &mut errors));
  let max_price = lookup("maxPrice").and_then(|raw| read_price(raw, "maxPrice", "Max price", &mut errors));

  if let (Some(min), Some(max)) = (min_price, max_price) {
    if min > max {
      errors.push("minPrice", "Min price must be less than or equal to max price");
    }
  }

  let name = query.get("name").filter(|n| !n.is_empty()).cloned();

  errors.into_result(|| ListParams {
    page: page.unwrap_or(DEFAULT_PAGE),
    limit: limit.unwrap_or(DEFAULT_LIMIT),
    name,
    min_price,
    max_price,
  })
}

fn coerce_integer(raw: &str) -> Result<i64, &'static str> {
  let value: f64 = raw.trim().parse().map_err(|_| NOT_A_NUMBER)?;
  if !value.is_finite() {
    return Err(NOT_A_NUMBER);
  }
  if value.fract() != 0.0 {
    return Err(NOT_AN_INTEGER);
  }
  // saturates outside i64, which every caller rejects anyway
  Ok(value as i64)
}

fn read_price(raw: &str, field: &str, label: &str, errors: &mut ValidationErrors) -> Option<Decimal> {
  match decimal_from_str(raw.trim()) {
    Some(price) if price < Decimal::ZERO => {
      errors.push(field, format!("{} must be non-negative", label));
      None
    }
    Some(price) => Some(price),
    // a finite number Decimal cannot hold
    None if raw.trim().parse::<f64>().is_ok_and(f64::is_finite) => {
      errors.push(field, format!("{} is out of range", label));
      None
    }
    None => {
      errors.push(field, NOT_A_NUMBER);
      None
    }
  }
}
