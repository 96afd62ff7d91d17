// core/src/validation/params.rs
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::model::ProductId;

// Hyphenated form only, e.g. 67e55044-10b1-426f-9247-bb680e5fe0c8.
const HYPHENATED_UUID_LEN: usize = 36;

/// Validates the `id` path parameter.
pub fn validate_product_id(raw: &str) -> Result<ProductId, ValidationErrors> {
  let mut errors = ValidationErrors::new();
  if raw.len() == HYPHENATED_UUID_LEN {
    if let Ok(id) = Uuid::try_parse(raw) {
      return Ok(ProductId(id));
    }
  }
  errors.push("id", "Invalid product ID");
  Err(errors)
}
