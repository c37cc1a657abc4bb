use crate::models::book::{BookId, BookRecord};
use crate::models::storage::StorageError;
use crate::Backend;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Book {0} not found")]
    NotFound(BookId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Every book in the store, ascending by id. An empty store is not an error.
pub async fn list_all(backend: &Backend) -> Result<Vec<BookRecord>, StorageError> {
    let books = backend.list_books().await?;
    debug!("Listed {} books", books.len());
    Ok(books)
}

pub async fn get_by_id(book_id: BookId, backend: &Backend) -> Result<BookRecord, QueryError> {
    backend
        .get_book(book_id.get())
        .await?
        .ok_or(QueryError::NotFound(book_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::seed_books;
    use crate::models::storage::MemoryBackend;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn seeded() -> Backend {
        Arc::new(MemoryBackend::seeded())
    }

    #[tokio::test]
    async fn list_all_returns_every_seed_row_once() {
        let books = list_all(&seeded()).await.unwrap();

        assert_eq!(books.len(), seed_books().len());
        let ids: HashSet<u32> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), books.len());
        assert_eq!(books[0].title, "Lord of The Rings");
        assert!(books.iter().all(BookRecord::is_complete));
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let backend: Backend = Arc::new(MemoryBackend::new(Vec::new()));
        assert!(list_all(&backend).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_id_matches_requested_id() {
        let backend = seeded();
        for seed in seed_books() {
            let book_id = BookId::new(seed.id).unwrap();
            let book = get_by_id(book_id, &backend).await.unwrap();
            assert_eq!(book.id, seed.id);
            assert_eq!(book, seed);
        }
    }

    #[tokio::test]
    async fn get_by_id_reports_missing_book() {
        let book_id = BookId::new(99999).unwrap();
        match get_by_id(book_id, &seeded()).await {
            Err(QueryError::NotFound(id)) => assert_eq!(id, book_id),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
