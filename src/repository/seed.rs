//! Initial catalog

use crate::{
    error::AppResult,
    models::book::{Book, BookStatus},
};

use super::RecordStore;

const INITIAL_BOOKS: [(&str, &str, i32, &str); 10] = [
    ("The Great Gatsby", "F. Scott Fitzgerald", 1925, "9780743273565"),
    ("1984", "George Orwell", 1949, "9780451524935"),
    ("To Kill a Mockingbird", "Harper Lee", 1960, "9780061120084"),
    ("Pride and Prejudice", "Jane Austen", 1813, "9781503290563"),
    ("The Catcher in the Rye", "J.D. Salinger", 1951, "9780316769488"),
    ("The Hobbit", "J.R.R. Tolkien", 1937, "9780618968633"),
    ("Moby Dick", "Herman Melville", 1851, "9781503280786"),
    ("War and Peace", "Leo Tolstoy", 1869, "9781853260629"),
    ("The Da Vinci Code", "Dan Brown", 2003, "9780307474278"),
    ("The Hunger Games", "Suzanne Collins", 2008, "9780439023481"),
];

impl RecordStore {
    /// Store holding the ten initial books (ids 1 to 10, all available)
    /// and no checkout records.
    pub fn seeded() -> AppResult<Self> {
        let mut store = Self::new();
        for (idx, (title, author, year, isbn)) in INITIAL_BOOKS.iter().enumerate() {
            store.books.insert(Book {
                id: idx as i32 + 1,
                title: title.to_string(),
                author: author.to_string(),
                year: *year,
                isbn: isbn.to_string(),
                status: BookStatus::Available,
            })?;
        }
        Ok(store)
    }
}
