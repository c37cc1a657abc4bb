use crate::error::ApiError;
use crate::models::book::BookId;
use crate::models::responses::{BookResponse, ErrorResponse};
use crate::services::books::{get_by_id, list_all};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "Every book, ascending by id", body = [BookResponse]),
        (status = 500, description = "Book store unavailable", body = ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = list_all(&state.backend).await?;
    info!("Listing {} books", books.len());

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = u32, Path, description = "Positive book identifier")),
    responses(
        (status = 200, description = "The requested book", body = BookResponse),
        (status = 400, description = "Identifier is not a positive integer", body = ErrorResponse),
        (status = 404, description = "No book with this identifier", body = ErrorResponse),
        (status = 500, description = "Book store unavailable", body = ErrorResponse)
    )
)]
pub async fn get_book(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id: BookId = raw_id.parse()?;
    info!("Fetching book {}", book_id);

    let book = get_by_id(book_id, &state.backend).await?;
    Ok(Json(book.into()))
}
