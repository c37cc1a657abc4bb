use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBookId {
    #[error("book id '{0}' is not a number")]
    NotANumber(String),
    #[error("book id must be positive, got {0}")]
    NotPositive(i64),
    #[error("book id {0} is out of range")]
    OutOfRange(i64),
}

/// Identifier of a seeded book. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BookId(u32);

impl BookId {
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .parse()
            .map_err(|_| InvalidBookId::NotANumber(s.to_string()))?;

        if value <= 0 {
            return Err(InvalidBookId::NotPositive(value));
        }

        u32::try_from(value)
            .map(Self)
            .map_err(|_| InvalidBookId::OutOfRange(value))
    }
}

impl TryFrom<u32> for BookId {
    type Error = InvalidBookId;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidBookId::NotPositive(value as i64))
    }
}

impl From<BookId> for u32 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

/// A book as the store persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: String,
    pub description: String,
    pub cover_image_url: String,
}

impl BookRecord {
    /// True when the id is positive and every text column is non-empty.
    pub fn is_complete(&self) -> bool {
        self.id > 0
            && [
                &self.title,
                &self.author,
                &self.isbn,
                &self.description,
                &self.cover_image_url,
            ]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

pub fn seed_books() -> Vec<BookRecord> {
    vec![
        BookRecord {
            id: 1,
            title: "Lord of The Rings".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            year: 1954,
            isbn: "978-0544003415".to_string(),
            description: "An epic high-fantasy quest to destroy the One Ring before the Dark Lord Sauron can reclaim it.".to_string(),
            cover_image_url: "https://covers.openlibrary.org/b/isbn/9780544003415-L.jpg".to_string(),
        },
        BookRecord {
            id: 2,
            title: "Harry Potter".to_string(),
            author: "J.K. Rowling".to_string(),
            year: 1997,
            isbn: "978-0590353427".to_string(),
            description: "An orphaned boy learns on his eleventh birthday that he is a wizard and is invited to Hogwarts.".to_string(),
            cover_image_url: "https://covers.openlibrary.org/b/isbn/9780590353427-L.jpg".to_string(),
        },
        BookRecord {
            id: 3,
            title: "The Hitchhiker's Guide to the Galaxy".to_string(),
            author: "Douglas Adams".to_string(),
            year: 1979,
            isbn: "978-0345391803".to_string(),
            description: "Seconds before Earth is demolished for a hyperspace bypass, Arthur Dent is rescued by a researcher for a galactic guidebook.".to_string(),
            cover_image_url: "https://covers.openlibrary.org/b/isbn/9780345391803-L.jpg".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parses_positive_ids() {
        assert_eq!("2".parse::<BookId>().unwrap().get(), 2);
        assert_eq!("4294967295".parse::<BookId>().unwrap().get(), u32::MAX);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_eq!(
            "abc".parse::<BookId>(),
            Err(InvalidBookId::NotANumber("abc".to_string()))
        );
        assert_eq!("".parse::<BookId>(), Err(InvalidBookId::NotANumber(String::new())));
        assert_eq!("0".parse::<BookId>(), Err(InvalidBookId::NotPositive(0)));
        assert_eq!("-1".parse::<BookId>(), Err(InvalidBookId::NotPositive(-1)));
        assert_eq!(
            "4294967296".parse::<BookId>(),
            Err(InvalidBookId::OutOfRange(4_294_967_296))
        );
        assert!("1.5".parse::<BookId>().is_err());
    }

    #[test]
    fn zero_is_not_a_book_id() {
        assert!(BookId::new(0).is_none());
        assert!(serde_json::from_str::<BookId>("0").is_err());
        assert_eq!(serde_json::from_str::<BookId>("7").unwrap().get(), 7);
    }

    #[test]
    fn seed_rows_are_complete_unique_and_ascending() {
        let books = seed_books();
        assert_eq!(books.len(), 3);
        assert!(books.iter().all(BookRecord::is_complete));

        let ids: Vec<u32> = books.iter().map(|b| b.id).collect();
        let unique: HashSet<u32> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn blank_field_makes_record_incomplete() {
        let mut book = seed_books().remove(0);
        book.isbn = "  ".to_string();
        assert!(!book.is_complete());
    }
}
