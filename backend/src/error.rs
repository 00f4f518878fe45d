//! Error handling for the inventory and sales backend

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{InvalidDate, SalePlanError, StockError, WindowError};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    #[error("Missing parameter: {message}")]
    MissingParameter { field: String, message: String },

    // Lookup and uniqueness errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    // Business logic errors
    #[error("Insufficient inventory found for product: {product_id}")]
    InsufficientStock { product_id: Uuid },

    #[error("Stock adjustment rejected: {0}")]
    StockOverflow(#[from] StockError),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidDate(_) | AppError::StockOverflow(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingParameter { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) | AppError::InsufficientStock { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateEntry(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::InvalidDate(_) => "INVALID_DATE",
            AppError::MissingParameter { .. } => "MISSING_PARAMETER",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateEntry(_) => "DUPLICATE_ENTRY",
            AppError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            AppError::StockOverflow(_) => "STOCK_OVERFLOW",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }
}

impl From<WindowError> for AppError {
    fn from(err: WindowError) -> Self {
        match err {
            WindowError::MissingParameter { parameter, .. } => AppError::MissingParameter {
                field: parameter.to_string(),
                message: err.to_string(),
            },
            WindowError::InvalidDate(invalid) => AppError::InvalidDate(invalid),
            WindowError::OutOfRange => AppError::validation("date", err.to_string()),
        }
    }
}

impl From<SalePlanError> for AppError {
    fn from(err: SalePlanError) -> Self {
        match err {
            SalePlanError::InsufficientStock { product_id, .. } => {
                AppError::InsufficientStock { product_id }
            }
            SalePlanError::InvalidQuantity { .. } => AppError::validation("quantity", err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        match fields.first() {
            Some((field, failures)) => {
                let reason = failures
                    .first()
                    .map(|failure| failure.code.to_string())
                    .unwrap_or_else(|| "invalid".to_string());
                AppError::validation(*field, format!("{} is {}", field, reason))
            }
            None => AppError::validation("body", "Request body is invalid"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("body", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        let field = missing_field(&message).unwrap_or("query").to_string();
        AppError::Validation { field, message }
    }
}

/// Name of the field in serde's "missing field `x`" message
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.split("missing field `").nth(1)?;
    rest.split('`').next()
}

/// Error response structure
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let field = match &self {
            AppError::Validation { field, .. } | AppError::MissingParameter { field, .. } => {
                Some(field.clone())
            }
            AppError::InsufficientStock { .. } => Some("product_id".to_string()),
            _ => None,
        };

        let message = match &self {
            AppError::Validation { message, .. } | AppError::MissingParameter { message, .. } => {
                message.clone()
            }
            AppError::NotFound(resource) => format!("{} not found", resource),
            AppError::DuplicateEntry(what) => format!("A record with this {} already exists", what),
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
