//! API error taxonomy
//!
//! Three outcomes leave the handlers: field-level validation failures (400),
//! the designed not-found outcome of a search (404), and everything else as
//! an opaque 500. Storage failures land in `Internal` unmodified; a failed
//! search is never reported as an empty success.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::types::{ErrorBody, FieldError, ValidationErrorBody};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(errors) => HttpResponse::BadRequest().json(ValidationErrorBody {
                errors: errors.clone(),
            }),
            ApiError::NotFound(message) => HttpResponse::NotFound().json(ErrorBody {
                error: message.clone(),
            }),
            ApiError::Internal(e) => {
                error!("Internal error: {:#}", e);
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Internal server error".to_string(),
                })
            }
        }
    }
}
