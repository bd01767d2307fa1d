//! Data models for the Hartland library

pub mod book;
pub mod checkout;
pub mod session;

// Re-export commonly used types
pub use book::{Book, BookStatus, CreateBook, NewBook};
pub use checkout::{CheckoutDetails, CheckoutRecord, CreateCheckout, NewCheckout};
pub use session::SessionClaims;
