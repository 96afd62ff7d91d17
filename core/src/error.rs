// core/src/error.rs
use std::fmt;

use anyhow::Error as AnyhowError;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
  pub field: String,
  pub message: String,
}

impl FieldViolation {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

/// Every violation found while validating one input. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.push(FieldViolation::new(field, message));
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn violations(&self) -> &[FieldViolation] {
    &self.0
  }

  /// Violations reported against `field`, in the order they were found.
  pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> + 'a {
    self.0.iter().filter(move |v| v.field == field)
  }

  pub fn has_field(&self, field: &str) -> bool {
    self.for_field(field).next().is_some()
  }

  /// `Ok(value)` when nothing was recorded, otherwise the collected violations.
  pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
    if self.is_empty() {
      Ok(value())
    } else {
      Err(self)
    }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for v in &self.0 {
      if !first {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", v.field, v.message)?;
      first = false;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

/// Which part of the request failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
  Query,
  Params,
  Body,
}

impl InputKind {
  /// Client-facing summary for a failed input of this kind.
  pub fn message(self) -> &'static str {
    match self {
      InputKind::Query => "Invalid query parameters",
      InputKind::Params => "Invalid URL parameters",
      InputKind::Body => "Invalid request body",
    }
  }
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Storage backend error: {0}")]
  Other(#[from] AnyhowError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("{}: {errors}", .input.message())]
  Validation { input: InputKind, errors: ValidationErrors },

  #[error("Product not found: {id}")]
  NotFound { id: Uuid },

  #[error("Storage failure. Source: {0}")]
  Storage(#[from] StoreError),
}

impl CatalogError {
  pub fn validation(input: InputKind, errors: ValidationErrors) -> Self {
    CatalogError::Validation { input, errors }
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, CatalogError::Validation { .. })
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, CatalogError::NotFound { .. })
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
