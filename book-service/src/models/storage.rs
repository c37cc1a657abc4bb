use crate::models::book::{seed_books, BookRecord};
use async_trait::async_trait;
use redis::AsyncCommands;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::info;

const BOOK_IDS_KEY: &str = "books:ids";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Book {0} is listed but its record is missing")]
    MissingRecord(u32),
}

#[async_trait]
pub trait StorageBackend {
    /// Every stored book, ascending by id.
    async fn list_books(&self) -> Result<Vec<BookRecord>, StorageError>;
    async fn get_book(&self, book_id: u32) -> Result<Option<BookRecord>, StorageError>;
    async fn count_books(&self) -> Result<usize, StorageError>;
    async fn test_connection(&self) -> Result<(), StorageError>;
}

pub struct MemoryBackend {
    books: BTreeMap<u32, BookRecord>,
}

impl MemoryBackend {
    pub fn new(records: Vec<BookRecord>) -> Self {
        Self {
            books: records.into_iter().map(|book| (book.id, book)).collect(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_books())
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn list_books(&self) -> Result<Vec<BookRecord>, StorageError> {
        Ok(self.books.values().cloned().collect())
    }

    async fn get_book(&self, book_id: u32) -> Result<Option<BookRecord>, StorageError> {
        Ok(self.books.get(&book_id).cloned())
    }

    async fn count_books(&self) -> Result<usize, StorageError> {
        Ok(self.books.len())
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

pub struct RedisBackend {
    client: redis::Client,
}

impl RedisBackend {
    /// Connects and writes the seed rows. Existing keys are left untouched.
    pub async fn new(redis_url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        let backend = Self { client };
        backend.seed(&seed_books()).await?;
        Ok(backend)
    }

    pub async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, StorageError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    async fn seed(&self, records: &[BookRecord]) -> Result<(), StorageError> {
        let mut conn = self.get_connection().await?;

        for record in records {
            let value = serde_json::to_string(record)?;
            let _: bool = conn.set_nx(book_key(record.id), &value).await?;
            let _: () = conn.zadd(BOOK_IDS_KEY, record.id, record.id).await?;
        }

        info!("Seeded {} books into Redis", records.len());
        Ok(())
    }
}

fn book_key(book_id: u32) -> String {
    format!("book:{}", book_id)
}

#[async_trait]
impl StorageBackend for RedisBackend {
    async fn list_books(&self) -> Result<Vec<BookRecord>, StorageError> {
        let mut conn = self.get_connection().await?;

        let ids: Vec<u32> = conn.zrange(BOOK_IDS_KEY, 0, -1).await?;

        let mut books = Vec::with_capacity(ids.len());
        for book_id in ids {
            let value: Option<String> = conn.get(book_key(book_id)).await?;
            match value {
                Some(json_str) => books.push(serde_json::from_str(&json_str)?),
                None => return Err(StorageError::MissingRecord(book_id)),
            }
        }

        Ok(books)
    }

    async fn get_book(&self, book_id: u32) -> Result<Option<BookRecord>, StorageError> {
        let mut conn = self.get_connection().await?;

        let value: Option<String> = conn.get(book_key(book_id)).await?;

        match value {
            Some(json_str) => Ok(Some(serde_json::from_str(&json_str)?)),
            None => Ok(None),
        }
    }

    async fn count_books(&self) -> Result<usize, StorageError> {
        let mut conn = self.get_connection().await?;
        Ok(conn.zcard(BOOK_IDS_KEY).await?)
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        let mut conn = self.get_connection().await?;
        let _: Option<String> = conn.get("__connection_test__").await?;
        Ok(())
    }
}

pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPool::connect(database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                year INTEGER NOT NULL,
                isbn TEXT NOT NULL,
                description TEXT NOT NULL,
                cover_image_url TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        let backend = Self { pool };
        backend.seed(&seed_books()).await?;
        Ok(backend)
    }

    async fn seed(&self, records: &[BookRecord]) -> Result<(), StorageError> {
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO books (id, title, author, year, isbn, description, cover_image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(record.id as i32)
            .bind(&record.title)
            .bind(&record.author)
            .bind(record.year)
            .bind(&record.isbn)
            .bind(&record.description)
            .bind(&record.cover_image_url)
            .execute(&self.pool)
            .await?;
        }

        info!("Seeded {} books into PostgreSQL", records.len());
        Ok(())
    }
}

fn record_from_row(row: &PgRow) -> Result<BookRecord, sqlx::Error> {
    Ok(BookRecord {
        id: row.try_get::<i32, _>("id")? as u32,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        year: row.try_get("year")?,
        isbn: row.try_get("isbn")?,
        description: row.try_get("description")?,
        cover_image_url: row.try_get("cover_image_url")?,
    })
}

#[async_trait]
impl StorageBackend for PostgresBackend {
    async fn list_books(&self) -> Result<Vec<BookRecord>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, title, author, year, isbn, description, cover_image_url FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let books = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    async fn get_book(&self, book_id: u32) -> Result<Option<BookRecord>, StorageError> {
        // Ids above i32::MAX cannot be stored in an INTEGER column.
        let Ok(book_id) = i32::try_from(book_id) else {
            return Ok(None);
        };

        let row = sqlx::query(
            "SELECT id, title, author, year, isbn, description, cover_image_url FROM books WHERE id = $1",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row).transpose()?)
    }

    async fn count_books(&self) -> Result<usize, StorageError> {
        let total_books = sqlx::query("SELECT COUNT(*) as count FROM books")
            .fetch_one(&self.pool)
            .await?
            .get::<i64, _>("count") as usize;

        Ok(total_books)
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: u32, title: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            author: "Author".to_string(),
            year: 2000,
            isbn: "isbn".to_string(),
            description: "description".to_string(),
            cover_image_url: "https://example.com/cover.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn memory_backend_lists_ascending_regardless_of_insert_order() {
        let backend = MemoryBackend::new(vec![book(9, "c"), book(1, "a"), book(4, "b")]);

        let ids: Vec<u32> = backend
            .list_books()
            .await
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();

        assert_eq!(ids, vec![1, 4, 9]);
        assert_eq!(backend.count_books().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn memory_backend_get_book() {
        let backend = MemoryBackend::seeded();

        let found = backend.get_book(2).await.unwrap().unwrap();
        assert_eq!(found.title, "Harry Potter");
        assert!(backend.get_book(99999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_memory_backend_is_valid() {
        let backend = MemoryBackend::new(Vec::new());
        assert!(backend.list_books().await.unwrap().is_empty());
        assert_eq!(backend.count_books().await.unwrap(), 0);
        assert!(backend.test_connection().await.is_ok());
    }
}
