// core/src/validation/product.rs

//! Rules for product request bodies. Creation requires every mutable field
//! except `image`; updates accept any subset.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use url::Url;

use super::{as_object, decimal_from_number, expected, read_field};
use crate::error::ValidationErrors;
use crate::model::{NewProduct, ProductChanges};

pub const NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Default)]
struct ProductFields {
  name: Option<String>,
  price: Option<Decimal>,
  quantity: Option<i32>,
  image: Option<String>,
}

fn read_product_fields(map: &Map<String, Value>, required: bool, errors: &mut ValidationErrors) -> ProductFields {
  ProductFields {
    name: read_field(map, "name", required, errors, parse_name),
    price: read_field(map, "price", required, errors, parse_price),
    quantity: read_field(map, "quantity", required, errors, parse_quantity),
    // image is optional for both shapes; "" counts as absent
    image: read_field(map, "image", false, errors, parse_image).flatten(),
  }
}

/// Validates a creation body into a [`NewProduct`].
pub fn validate_new_product(body: &Value) -> Result<NewProduct, ValidationErrors> {
  let mut errors = ValidationErrors::new();
  let Some(map) = as_object(body, &mut errors) else {
    return Err(errors);
  };
  let fields = read_product_fields(map, true, &mut errors);

  match fields {
    ProductFields {
      name: Some(name),
      price: Some(price),
      quantity: Some(quantity),
      image,
    } if errors.is_empty() => Ok(NewProduct {
      name,
      price,
      quantity,
      image,
    }),
    _ => Err(errors),
  }
}

/// Validates an update body into a [`ProductChanges`]. An empty object is valid.
pub fn validate_product_changes(body: &Value) -> Result<ProductChanges, ValidationErrors> {
  let mut errors = ValidationErrors::new();
  let Some(map) = as_object(body, &mut errors) else {
    return Err(errors);
  };
  let fields = read_product_fields(map, false, &mut errors);

  errors.into_result(|| ProductChanges {
    name: fields.name,
    price: fields.price,
    quantity: fields.quantity,
    image: fields.image,
  })
}

fn parse_name(value: &Value) -> Result<String, String> {
  let Value::String(raw) = value else {
    return Err(expected("string", value));
  };
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err("Name is required".to_string());
  }
  if trimmed.chars().count() > NAME_MAX_CHARS {
    return Err("Name too long".to_string());
  }
  Ok(trimmed.to_string())
}

fn parse_price(value: &Value) -> Result<Decimal, String> {
  let Value::Number(number) = value else {
    return Err(expected("number", value));
  };
  let price = decimal_from_number(number).ok_or_else(|| "Price is out of range".to_string())?;
  if price <= Decimal::ZERO {
    return Err("Price must be positive".to_string());
  }
  Ok(price)
}

fn parse_quantity(value: &Value) -> Result<i32, String> {
  let Value::Number(number) = value else {
    return Err(expected("number", value));
  };
  let whole = match (number.as_i64(), number.as_f64()) {
    (Some(i), _) => i,
    (None, Some(f)) if f.fract() != 0.0 => return Err("Expected integer, received float".to_string()),
    (None, Some(f)) if f < 0.0 => return Err("Quantity must be non-negative".to_string()),
    // integral floats such as 5.0
    (None, Some(f)) if f <= f64::from(i32::MAX) => f as i64,
    _ => return Err(format!("Quantity must be at most {}", i32::MAX)),
  };
  if whole < 0 {
    return Err("Quantity must be non-negative".to_string());
  }
  i32::try_from(whole).map_err(|_| format!("Quantity must be at most {}", i32::MAX))
}

fn parse_image(value: &Value) -> Result<Option<String>, String> {
  let Value::String(raw) = value else {
    return Err(expected("string", value));
  };
  if raw.is_empty() {
    return Ok(None);
  }
  Url::parse(raw)
    .map(|_| Some(raw.clone()))
    .map_err(|_| "Invalid URL".to_string())
}
