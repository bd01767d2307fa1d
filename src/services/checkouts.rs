//! Checkout workflow: lending books out and taking them back

use chrono::{Local, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookStatus,
        checkout::{CheckoutDetails, CheckoutRecord, CreateCheckout},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CheckoutService {
    repository: Repository,
}

impl CheckoutService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend a book. Fails with `BookUnavailable` when the book is unknown,
    /// not available, or already has an open record.
    pub async fn checkout(&self, form: CreateCheckout) -> AppResult<CheckoutRecord> {
        let checkout = form.into_new_checkout()?;
        let book_id = checkout.book_id;

        let mut guard = self.repository.write().await;
        let store = &mut *guard;

        let available = store
            .books
            .get(book_id)
            .map(|book| book.is_available())
            .unwrap_or(false);
        if !available {
            tracing::warn!(book_id, "Checkout refused: book not available");
            return Err(AppError::BookUnavailable(book_id));
        }

        let record = store
            .checkouts
            .open(checkout)
            .ok_or(AppError::BookUnavailable(book_id))?;
        store.books.set_status(book_id, BookStatus::CheckedOut);

        tracing::info!(
            checkout_id = record.id,
            book_id,
            user = %record.user_name,
            "Book checked out"
        );
        Ok(record)
    }

    /// Close an open record, dated today
    pub async fn checkin(&self, checkout_id: i32) -> Option<CheckoutRecord> {
        self.checkin_on(checkout_id, Local::now().date_naive()).await
    }

    /// Close the open record with this id and make its book available again.
    /// Returns `None`, changing nothing, when no open record matches.
    pub async fn checkin_on(&self, checkout_id: i32, returned: NaiveDate) -> Option<CheckoutRecord> {
        let mut guard = self.repository.write().await;
        let store = &mut *guard;

        let Some(record) = store.checkouts.close(checkout_id, returned) else {
            tracing::debug!(checkout_id, "Check-in ignored: no open record");
            return None;
        };
        if !store.books.set_status(record.book_id, BookStatus::Available) {
            tracing::warn!(checkout_id, book_id = record.book_id, "Checked-in record references an unknown book");
        }

        tracing::info!(checkout_id, book_id = record.book_id, "Book checked in");
        Some(record)
    }

    pub async fn get_record(&self, checkout_id: i32) -> Option<CheckoutRecord> {
        self.repository.read().await.checkouts.get(checkout_id).cloned()
    }

    /// Every record, joined with its book title
    pub async fn checked_out(&self) -> Vec<CheckoutDetails> {
        let store = self.repository.read().await;
        store
            .checkouts
            .records()
            .iter()
            .map(|record| {
                let title = store.books.get(record.book_id).map(|b| b.title.as_str());
                CheckoutDetails::new(record, title)
            })
            .collect()
    }
}
