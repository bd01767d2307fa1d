//! Checkout ledger: append-only checkout records

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::checkout::{CheckoutRecord, NewCheckout};

/// Records are never removed, so a record's id is its 1-based position.
/// At most one open record exists per book.
#[derive(Debug, Default)]
pub struct CheckoutLedger {
    records: Vec<CheckoutRecord>,
    open_by_book: HashMap<i32, usize>,
}

impl CheckoutLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open record for a book, if any
    pub fn open_for_book(&self, book_id: i32) -> Option<&CheckoutRecord> {
        self.open_by_book.get(&book_id).map(|&idx| &self.records[idx])
    }

    /// Append a new open record. Returns `None` if the book already has one.
    pub fn open(&mut self, checkout: NewCheckout) -> Option<CheckoutRecord> {
        if self.open_by_book.contains_key(&checkout.book_id) {
            return None;
        }

        let idx = self.records.len();
        let record = CheckoutRecord {
            id: idx as i32 + 1,
            book_id: checkout.book_id,
            user_name: checkout.user_name,
            checkout_date: checkout.checkout_date,
            checkin_date: checkout.checkin_date,
            returned_date: None,
        };
        self.records.push(record.clone());
        self.open_by_book.insert(record.book_id, idx);
        Some(record)
    }

    /// Close the first open record with this id
    pub fn close(&mut self, checkout_id: i32, returned: NaiveDate) -> Option<CheckoutRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == checkout_id && r.is_open())?;

        let record = &mut self.records[idx];
        record.returned_date = Some(returned);
        self.open_by_book.remove(&record.book_id);
        Some(record.clone())
    }

    pub fn get(&self, checkout_id: i32) -> Option<&CheckoutRecord> {
        self.records.iter().find(|r| r.id == checkout_id)
    }

    /// All records in creation order
    pub fn records(&self) -> &[CheckoutRecord] {
        &self.records
    }

    pub fn open_count(&self) -> usize {
        self.open_by_book.len()
    }
}
