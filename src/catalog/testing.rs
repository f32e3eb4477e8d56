//! Mock catalog for testing
//!
//! Queued responses plus a record of every call, mirroring the real
//! client's contract without I/O.

use super::{Book, CatalogApi, CatalogError, Shelf};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Mock catalog that returns queued responses
#[derive(Default)]
pub struct MockCatalog {
    search_responses: Mutex<VecDeque<Result<Vec<Book>, CatalogError>>>,
    shelf_responses: Mutex<VecDeque<Result<Vec<Shelf>, CatalogError>>>,
    add_responses: Mutex<VecDeque<Result<(), CatalogError>>>,
    /// Record of search queries
    pub searches: Mutex<Vec<String>>,
    /// Record of add-to-shelf calls
    pub adds: Mutex<Vec<(u64, String)>>,
    list_calls: AtomicU32,
}

#[allow(dead_code)]
impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_search(&self, response: Result<Vec<Book>, CatalogError>) {
        self.search_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_shelves(&self, response: Result<Vec<Shelf>, CatalogError>) {
        self.shelf_responses.lock().unwrap().push_back(response);
    }

    pub fn queue_add(&self, response: Result<(), CatalogError>) {
        self.add_responses.lock().unwrap().push_back(response);
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn adds(&self) -> Vec<(u64, String)> {
        self.adds.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        self.searches.lock().unwrap().push(query.to_string());
        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CatalogError::network("no mock response queued")))
    }

    async fn list_shelves(&self) -> Result<Vec<Shelf>, CatalogError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.shelf_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CatalogError::network("no mock response queued")))
    }

    async fn add_to_shelf(&self, book_id: u64, shelf_name: &str) -> Result<(), CatalogError> {
        self.adds
            .lock()
            .unwrap()
            .push((book_id, shelf_name.to_string()));
        self.add_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CatalogError::network("no mock response queued")))
    }
}

/// Shorthand book for tests
pub fn book(id: u64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        average_rating: 4.2,
    }
}

/// Shorthand shelf for tests
pub fn shelf(id: u64, name: &str) -> Shelf {
    Shelf {
        id,
        name: name.to_string(),
    }
}
