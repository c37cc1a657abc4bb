use crate::models::book::{BookId, InvalidBookId};
use crate::models::responses::ErrorResponse;
use crate::models::storage::StorageError;
use crate::services::books::QueryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed book id: {0}")]
    MalformedId(#[from] InvalidBookId),

    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(book_id) => ApiError::NotFound(book_id),
            QueryError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Backend details stay in the log.
        let message = match &self {
            ApiError::Storage(e) => {
                error!("Storage failure: {}", e);
                "Internal storage error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
