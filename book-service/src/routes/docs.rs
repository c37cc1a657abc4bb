use crate::models::responses::{BookResponse, ErrorResponse, HealthResponse};
use crate::routes::{books, health};
use axum::response::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Hipster Books", description = "Read-only book catalogue"),
    paths(books::list_books, books::get_book, health::health_check),
    components(schemas(BookResponse, ErrorResponse, HealthResponse))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document client generators consume.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/books"));
        assert!(paths.iter().any(|p| p.as_str() == "/books/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/status"));
    }

    #[test]
    fn book_schema_uses_wire_field_names() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let book = &json["components"]["schemas"]["BookResponse"]["properties"];

        assert!(book.get("coverImageUrl").is_some());
        assert!(book.get("cover_image_url").is_none());
    }
}
