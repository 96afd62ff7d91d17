// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use catalog::{CatalogError, FieldViolation};
use serde::Serialize;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Product not found";
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  // Body that is not parseable JSON at all; carries the parser's message for logs only.
  #[error("Malformed request body: {0}")]
  MalformedBody(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),
}

/// Body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
  pub message: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<&'a [FieldViolation]>,
}

impl ErrorBody<'static> {
  pub fn message(message: &'static str) -> Self {
    Self { message, errors: None }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Catalog(CatalogError::Validation { .. }) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
      AppError::Catalog(CatalogError::NotFound { .. }) => StatusCode::NOT_FOUND,
      AppError::Catalog(CatalogError::Storage(_)) | AppError::Config(_) | AppError::Sqlx(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error; the client only ever sees the fixed messages below.
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
    }

    let body = match self {
      AppError::Catalog(CatalogError::Validation { input, errors }) => ErrorBody {
        message: input.message(),
        errors: Some(errors.violations()),
      },
      AppError::Catalog(CatalogError::NotFound { .. }) => ErrorBody::message(NOT_FOUND_MESSAGE),
      AppError::MalformedBody(_) => ErrorBody::message(catalog::InputKind::Body.message()),
      AppError::Catalog(CatalogError::Storage(_)) | AppError::Config(_) | AppError::Sqlx(_) => {
        ErrorBody::message(SERVER_ERROR_MESSAGE)
      }
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
