//! Typed client for the Hipster Books service.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

pub mod view;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: String,
    pub description: String,
    pub cover_image_url: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    books: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Book {0} not found")]
    NotFound(u32),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Service not ready after {0} attempts")]
    NotReady(u32),
}

pub struct BookClient {
    client: Client,
    base_url: String,
}

impl BookClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let url = format!("{}/books", self.base_url);
        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(ClientError::UnexpectedStatus(response.status()))
        }
    }

    pub async fn get_book(&self, book_id: u32) -> Result<Book, ClientError> {
        let url = format!("{}/books/{}", self.base_url, book_id);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(book_id)),
            StatusCode::BAD_REQUEST => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map(|body| body.error)
                    .unwrap_or_else(|_| format!("invalid book id {}", book_id));
                Err(ClientError::BadRequest(message))
            }
            status => Err(ClientError::UnexpectedStatus(status)),
        }
    }

    /// Polls `/status` until the service answers with success.
    pub async fn wait_until_ready(&self, attempts: u32, delay: Duration) -> Result<(), ClientError> {
        let url = format!("{}/status", self.base_url);

        for attempt in 1..=attempts {
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    let status: StatusResponse = response.json().await?;
                    info!("Book service is {} with {} books", status.status, status.books);
                    return Ok(());
                }
                Ok(response) => {
                    warn!("Book service responded with status: {}", response.status());
                }
                Err(e) => {
                    warn!("Book service not ready (attempt {}): {}", attempt, e);
                }
            }

            if attempt < attempts {
                sleep(delay).await;
            }
        }

        Err(ClientError::NotReady(attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = BookClient::new("http://localhost:7000/");
        assert_eq!(client.base_url(), "http://localhost:7000");
    }

    #[test]
    fn decodes_wire_book() {
        let json = r#"{
            "id": 2,
            "title": "Harry Potter",
            "author": "J.K. Rowling",
            "year": 1997,
            "isbn": "978-0590353427",
            "description": "A boy wizard.",
            "coverImageUrl": "https://covers.openlibrary.org/b/isbn/9780590353427-L.jpg"
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 2);
        assert_eq!(book.title, "Harry Potter");
        assert!(book.cover_image_url.ends_with("-L.jpg"));

        let again: Book = serde_json::from_str(&serde_json::to_string(&book).unwrap()).unwrap();
        assert_eq!(again, book);
    }
}
