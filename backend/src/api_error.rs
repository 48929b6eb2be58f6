use crate::service::CoordinatorError;
use crate::store::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Match service unavailable: {0}")]
    ServiceUnavailable(#[from] CoordinatorError),

    #[error("Stats store error: {0}")]
    StoreError(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
    details: Option<String>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::ServiceUnavailable(_) => "Match service unavailable",
            ApiError::StoreError(_) => "Stats store unavailable",
        };

        let status = self.status_code();
        let error_response = ErrorResponse {
            error: message.to_string(),
            code: status.as_u16(),
            details: Some(self.to_string()),
        };

        HttpResponse::build(status).json(error_response)
    }
}
