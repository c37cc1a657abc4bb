use crate::models::responses::HealthResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::warn;

#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Book store reachable", body = HealthResponse),
        (status = 503, description = "Book store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started_at = state.started_at.to_rfc3339();

    let books = match state.backend.test_connection().await {
        Ok(()) => state.backend.count_books().await,
        Err(e) => Err(e),
    };

    match books {
        Ok(books) => (
            StatusCode::OK,
            Json(HealthResponse {
                service: "book-service".to_string(),
                status: "running".to_string(),
                books,
                started_at,
            }),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    service: "book-service".to_string(),
                    status: "unavailable".to_string(),
                    books: 0,
                    started_at,
                }),
            )
        }
    }
}
