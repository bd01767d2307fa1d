//! Book catalog: insertion-ordered storage with id and ISBN lookups

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookStatus, NewBook},
};

#[derive(Debug)]
pub struct BookCatalog {
    books: IndexMap<i32, Book>,
    ids_by_isbn: HashMap<String, i32>,
    next_id: i32,
}

impl Default for BookCatalog {
    fn default() -> Self {
        Self {
            books: IndexMap::new(),
            ids_by_isbn: HashMap::new(),
            next_id: 1,
        }
    }
}

impl BookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book with the next sequential id, status `available`
    pub fn add(&mut self, book: NewBook) -> AppResult<Book> {
        if self.ids_by_isbn.contains_key(&book.isbn) {
            return Err(AppError::DuplicateIsbn(book.isbn));
        }

        let book = Book {
            id: self.next_id,
            title: book.title,
            author: book.author,
            year: book.year,
            isbn: book.isbn,
            status: BookStatus::Available,
        };
        self.insert(book.clone())?;
        Ok(book)
    }

    /// Insert a fully formed book, keeping its id. Used for seeding.
    pub(crate) fn insert(&mut self, book: Book) -> AppResult<()> {
        if self.ids_by_isbn.contains_key(&book.isbn) {
            return Err(AppError::DuplicateIsbn(book.isbn));
        }
        if self.books.contains_key(&book.id) {
            return Err(AppError::Internal(format!("Book id {} already in use", book.id)));
        }

        self.next_id = self.next_id.max(book.id + 1);
        self.ids_by_isbn.insert(book.isbn.clone(), book.id);
        self.books.insert(book.id, book);
        Ok(())
    }

    pub fn get(&self, id: i32) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn get_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.ids_by_isbn.get(isbn).and_then(|id| self.books.get(id))
    }

    /// All books in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Update the status if the book exists. Returns whether it did.
    pub fn set_status(&mut self, id: i32, status: BookStatus) -> bool {
        match self.books.get_mut(&id) {
            Some(book) => {
                book.status = status;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
