//! Record store for books and checkout records

pub mod books;
pub mod checkouts;
pub mod seed;

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use books::BookCatalog;
pub use checkouts::CheckoutLedger;

/// Owns both collections. Only services mutate it, always under the
/// repository's write lock; the collections are not reachable from
/// outside the crate:
///
/// ```compile_fail
/// use hartland_library::{models::BookStatus, repository::RecordStore};
///
/// let mut store = RecordStore::seeded().unwrap();
/// store.books.set_status(1, BookStatus::CheckedOut);
/// ```
#[derive(Debug, Default)]
pub struct RecordStore {
    pub(crate) books: BookCatalog,
    pub(crate) checkouts: CheckoutLedger,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Shared handle to the process-wide record store
#[derive(Clone, Default)]
pub struct Repository {
    store: Arc<RwLock<RecordStore>>,
}

impl Repository {
    /// Create a repository around the given store
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store.read().await
    }

    /// Hold the returned guard for the whole read-then-write sequence
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store.write().await
    }
}
