// core/src/validation/mod.rs

//! Pure checks that turn untyped request input into typed records.
//!
//! Every validator inspects the whole input and reports all violations it
//! finds, each tagged with the field it belongs to. Nothing here touches
//! storage.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::ValidationErrors;

pub mod list_query;
pub mod params;
pub mod product;

pub use list_query::validate_list_params;
pub use params::validate_product_id;
pub use product::{validate_new_product, validate_product_changes};

pub(crate) const REQUIRED: &str = "Required";

/// Type name used in "Expected X, received Y" messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

pub(crate) fn expected(kind: &str, value: &Value) -> String {
  format!("Expected {}, received {}", kind, json_type_name(value))
}

/// Borrows the body as a JSON object or records a `body` violation.
pub(crate) fn as_object<'a>(body: &'a Value, errors: &mut ValidationErrors) -> Option<&'a Map<String, Value>> {
  match body {
    Value::Object(map) => Some(map),
    other => {
      errors.push("body", expected("object", other));
      None
    }
  }
}

/// Looks up `field` and runs `parse` on it, recording the outcome in `errors`.
///
/// A missing field is only a violation when `required` is set.
pub(crate) fn read_field<T>(
  map: &Map<String, Value>,
  field: &str,
  required: bool,
  errors: &mut ValidationErrors,
  parse: impl FnOnce(&Value) -> Result<T, String>,
) -> Option<T> {
  match map.get(field) {
    None => {
      if required {
        errors.push(field, REQUIRED);
      }
      None
    }
    Some(value) => match parse(value) {
      Ok(parsed) => Some(parsed),
      Err(message) => {
        errors.push(field, message);
        None
      }
    },
  }
}

/// Exact decimal form of a JSON number.
pub(crate) fn decimal_from_number(number: &serde_json::Number) -> Option<Decimal> {
  if let Some(i) = number.as_i64() {
    return Some(Decimal::from(i));
  }
  if let Some(u) = number.as_u64() {
    return Some(Decimal::from(u));
  }
  decimal_from_str(&number.to_string())
}

/// Parses plain (`12.50`) and scientific (`1.25e1`) notation.
pub(crate) fn decimal_from_str(raw: &str) -> Option<Decimal> {
  Decimal::from_str(raw)
    .or_else(|_| Decimal::from_scientific(raw))
    .ok()
}
