//! Book model and related types

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Circulation status of a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    #[default]
    Available,
    CheckedOut,
}

impl FromStr for BookStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(BookStatus::Available),
            "checked_out" | "checked out" | "checked-out" => Ok(BookStatus::CheckedOut),
            other => Err(AppError::Validation(format!("Unknown book status: {}", other))),
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked out",
        };
        write!(f, "{}", label)
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: String,
    pub status: BookStatus,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Case-insensitive substring match on title or author.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Add-book form, as submitted. Missing keys arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateBook {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub author: String,
    /// Publication year, digits only
    #[validate(custom(function = "not_blank"))]
    pub year: String,
    #[validate(custom(function = "not_blank"))]
    pub isbn: String,
}

/// Validated book fields ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: String,
}

impl CreateBook {
    /// Check required fields first, then the year format
    pub fn into_new_book(self) -> AppResult<NewBook> {
        self.validate()
            .map_err(|_| AppError::Validation("All fields are required!".to_string()))?;

        if !self.year.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::Validation("Year must be a number!".to_string()));
        }
        let year = self
            .year
            .parse::<i32>()
            .map_err(|_| AppError::Validation("Year must be a number!".to_string()))?;

        Ok(NewBook {
            title: self.title,
            author: self.author,
            year,
            isbn: self.isbn,
        })
    }
}
