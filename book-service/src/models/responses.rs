use crate::models::book::BookRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire shape of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: String,
    pub description: String,
    pub cover_image_url: String,
}

impl From<BookRecord> for BookResponse {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author: record.author,
            year: record.year,
            isbn: record.isbn,
            description: record.description,
            cover_image_url: record.cover_image_url,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
    pub books: usize,
    pub started_at: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
