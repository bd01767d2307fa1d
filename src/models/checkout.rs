//! Checkout record model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Date format accepted on checkout forms
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rendered in place of the actual return date while a record is open
pub const NOT_RETURNED: &str = "Not Returned Yet";

/// Rendered when a record points at a book missing from the catalog
pub const UNKNOWN_BOOK: &str = "Unknown Book";

/// One lending of one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRecord {
    pub id: i32,
    pub book_id: i32,
    pub user_name: String,
    pub checkout_date: NaiveDate,
    /// Expected return date
    pub checkin_date: NaiveDate,
    pub returned_date: Option<NaiveDate>,
}

impl CheckoutRecord {
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }
}

/// Checkout form, as submitted. Missing keys arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateCheckout {
    pub book_id: String,
    pub user_name: String,
    /// YYYY-MM-DD
    pub checkout_date: String,
    /// Expected return date, YYYY-MM-DD
    pub checkin_date: String,
}

/// Validated checkout request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckout {
    pub book_id: i32,
    pub user_name: String,
    pub checkout_date: NaiveDate,
    pub checkin_date: NaiveDate,
}

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("{} must be a date (YYYY-MM-DD)", field)))
}

impl CreateCheckout {
    pub fn into_new_checkout(self) -> AppResult<NewCheckout> {
        let book_id = self
            .book_id
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation("Book id must be a number!".to_string()))?;

        let user_name = self.user_name.trim();
        if user_name.is_empty() {
            return Err(AppError::Validation("User name is required!".to_string()));
        }

        let checkout_date = parse_date("Checkout date", &self.checkout_date)?;
        let checkin_date = parse_date("Check-in date", &self.checkin_date)?;
        if checkin_date < checkout_date {
            return Err(AppError::Validation(
                "Check-in date cannot be before the checkout date!".to_string(),
            ));
        }

        Ok(NewCheckout {
            book_id,
            user_name: user_name.to_string(),
            checkout_date,
            checkin_date,
        })
    }
}

/// Checkout record joined with its book title, for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckoutDetails {
    pub id: i32,
    pub book_title: String,
    pub user_name: String,
    pub checkout_date: NaiveDate,
    pub expected_checkin_date: NaiveDate,
    /// Return date, or "Not Returned Yet"
    pub actual_checkin_date: String,
}

impl CheckoutDetails {
    pub fn new(record: &CheckoutRecord, book_title: Option<&str>) -> Self {
        Self {
            id: record.id,
            book_title: book_title.unwrap_or(UNKNOWN_BOOK).to_string(),
            user_name: record.user_name.clone(),
            checkout_date: record.checkout_date,
            expected_checkin_date: record.checkin_date,
            actual_checkin_date: record
                .returned_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| NOT_RETURNED.to_string()),
        }
    }
}
