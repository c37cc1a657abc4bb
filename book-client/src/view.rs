use crate::Book;
use std::fmt::Write;

pub fn render_list(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books in the catalogue.\n".to_string();
    }

    let mut out = String::new();
    for book in books {
        let _ = writeln!(out, "{}. {} — {} ({})", book.id, book.title, book.author, book.year);
    }
    out
}

pub fn render_detail(book: &Book) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", book.title);
    let _ = writeln!(out, "{}", "=".repeat(book.title.chars().count()));
    let _ = writeln!(out, "Id:          {}", book.id);
    let _ = writeln!(out, "Author:      {}", book.author);
    let _ = writeln!(out, "Year:        {}", book.year);
    let _ = writeln!(out, "ISBN:        {}", book.isbn);
    let _ = writeln!(out, "Cover:       {}", book.cover_image_url);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", book.description);
    out
}
