//! Catalog management and queries

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookStatus, CreateBook},
    repository::Repository,
};

/// Counts shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LibrarySummary {
    pub total_books: usize,
    pub available_books: usize,
    pub open_checkouts: usize,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate the form and add the book under the next id
    pub async fn add_book(&self, form: CreateBook) -> AppResult<Book> {
        let new_book = form.into_new_book()?;

        let mut store = self.repository.write().await;
        match store.books.add(new_book) {
            Ok(book) => {
                tracing::info!(book_id = book.id, isbn = %book.isbn, "Book added to catalog");
                Ok(book)
            }
            Err(e) => {
                tracing::warn!("Rejected new book: {}", e);
                Err(e)
            }
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Option<Book> {
        self.repository.read().await.books.get(id).cloned()
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> Option<Book> {
        self.repository.read().await.books.get_by_isbn(isbn).cloned()
    }

    /// All books in insertion order
    pub async fn list_all(&self) -> Vec<Book> {
        self.repository.read().await.books.iter().cloned().collect()
    }

    /// Overwrite a book's status. Unknown ids are ignored; the updated
    /// book is returned when there was one.
    pub async fn set_status(&self, id: i32, status: BookStatus) -> Option<Book> {
        let mut store = self.repository.write().await;
        if !store.books.set_status(id, status) {
            tracing::debug!(book_id = id, "Status change ignored: unknown book");
            return None;
        }
        if status == BookStatus::Available && store.checkouts.open_for_book(id).is_some() {
            tracing::warn!(book_id = id, "Book marked available while a checkout is still open");
        }
        tracing::info!(book_id = id, %status, "Book status updated");
        store.books.get(id).cloned()
    }

    /// Case-insensitive substring search over title and author
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let store = self.repository.read().await;
        let results: Vec<Book> = store
            .books
            .iter()
            .filter(|book| book.matches(&needle))
            .cloned()
            .collect();
        tracing::debug!(query = %needle, hits = results.len(), "Catalog search");
        Ok(results)
    }

    pub async fn available_books(&self) -> Vec<Book> {
        self.repository
            .read()
            .await
            .books
            .iter()
            .filter(|book| book.is_available())
            .cloned()
            .collect()
    }

    pub async fn summary(&self) -> LibrarySummary {
        let store = self.repository.read().await;
        LibrarySummary {
            total_books: store.books.len(),
            available_books: store.books.iter().filter(|b| b.is_available()).count(),
            open_checkouts: store.checkouts.open_count(),
        }
    }
}
