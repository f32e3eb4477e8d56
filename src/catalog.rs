//! Remote book catalog access
//!
//! Three operations: search books, list the user's shelves, and file a book
//! onto a named shelf. The client performs no retries; a single remote
//! failure surfaces immediately as a [`CatalogError`].

mod client;
mod error;
#[cfg(test)]
pub mod testing;

pub use client::HttpCatalog;
pub use error::{CatalogError, CatalogErrorKind};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A book returned from a catalog search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub average_rating: f64,
}

/// One of the user's shelves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: u64,
    pub name: String,
}

/// Remote catalog operations
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search books by free text. Results come back in catalog order and
    /// may be empty; the catalog's ranking is trusted as-is.
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError>;

    /// List the configured user's shelves, unique by id
    async fn list_shelves(&self) -> Result<Vec<Shelf>, CatalogError>;

    /// File a book onto a shelf. The remote creates the shelf if it does
    /// not exist; shelf existence is not pre-validated here.
    async fn add_to_shelf(&self, book_id: u64, shelf_name: &str) -> Result<(), CatalogError>;
}

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        (**self).search(query).await
    }

    async fn list_shelves(&self) -> Result<Vec<Shelf>, CatalogError> {
        (**self).list_shelves().await
    }

    async fn add_to_shelf(&self, book_id: u64, shelf_name: &str) -> Result<(), CatalogError> {
        (**self).add_to_shelf(book_id, shelf_name).await
    }
}
