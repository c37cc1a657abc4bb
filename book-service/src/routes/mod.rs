pub mod books;
pub mod docs;
pub mod health;
