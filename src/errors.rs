use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(_) => AppError::NotFound,
            DomainError::InvalidInput(_) | DomainError::MissingLocation => {
                AppError::BadRequest(e.to_string())
            }
            DomainError::IllegalTransition(_)
            | DomainError::AlreadyAssigned
            | DomainError::OutOfStock
            | DomainError::ConcurrentUpdate => AppError::Conflict(e.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = |msg: &str| serde_json::json!({ "message": msg });
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(body(msg)),
            AppError::Unauthorized => HttpResponse::Unauthorized().json(body(&self.to_string())),
            AppError::Forbidden => HttpResponse::Forbidden().json(body(&self.to_string())),
            AppError::NotFound => HttpResponse::NotFound().json(body(&self.to_string())),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(body(msg)),
            AppError::Internal(msg) => {
                log::error!("internal error: {msg}");
                HttpResponse::InternalServerError().json(body("Internal server error"))
            }
        }
    }
}
