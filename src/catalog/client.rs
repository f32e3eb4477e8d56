//! HTTP catalog client
//!
//! Talks to the catalog's XML endpoints: `/search/index.xml`,
//! `/shelf/list.xml` and `/shelf/add_to_shelf.xml`.

use super::{Book, CatalogApi, CatalogError, Shelf};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.goodreads.com";

/// Catalog client over HTTP
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    key: String,
    secret: String,
    user_id: String,
}

impl HttpCatalog {
    pub fn new(key: String, secret: String, user_id: String, base_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            key,
            secret,
            user_id,
        }
    }

    async fn get_xml(&self, path: &str, query: &[(&str, &str)]) -> Result<String, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(CatalogError::from_status(status, &body));
        }
        Ok(body)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let body = self
            .get_xml("/search/index.xml", &[("key", self.key.as_str()), ("q", query)])
            .await?;
        parse_search(&body)
    }

    async fn list_shelves(&self) -> Result<Vec<Shelf>, CatalogError> {
        let body = self
            .get_xml(
                "/shelf/list.xml",
                &[("key", self.key.as_str()), ("user_id", self.user_id.as_str())],
            )
            .await?;
        parse_shelves(&body)
    }

    async fn add_to_shelf(&self, book_id: u64, shelf_name: &str) -> Result<(), CatalogError> {
        let book_id = book_id.to_string();
        // The write endpoint authenticates with the key/secret pair.
        let form = [
            ("key", self.key.as_str()),
            ("secret", self.secret.as_str()),
            ("name", shelf_name),
            ("book_id", book_id.as_str()),
        ];
        let url = format!("{}/shelf/add_to_shelf.xml", self.base_url);
        let resp = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| CatalogError::network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::from_status(status, &body));
        }
        Ok(())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    search: SearchSection,
}

#[derive(Debug, Deserialize)]
struct SearchSection {
    results: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResults {
    #[serde(rename = "work", default)]
    works: Vec<WorkEntry>,
}

#[derive(Debug, Deserialize)]
struct WorkEntry {
    average_rating: f64,
    best_book: BestBookEntry,
}

#[derive(Debug, Deserialize)]
struct BestBookEntry {
    id: u64,
    title: String,
    author: AuthorEntry,
}

#[derive(Debug, Deserialize)]
struct AuthorEntry {
    name: String,
}

impl From<WorkEntry> for Book {
    fn from(work: WorkEntry) -> Self {
        Book {
            id: work.best_book.id,
            title: work.best_book.title,
            author: work.best_book.author.name,
            average_rating: work.average_rating,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ShelvesEnvelope {
    shelves: ShelfSection,
}

#[derive(Debug, Default, Deserialize)]
struct ShelfSection {
    #[serde(rename = "user_shelf", default)]
    shelves: Vec<UserShelfEntry>,
}

#[derive(Debug, Deserialize)]
struct UserShelfEntry {
    id: u64,
    name: String,
}

fn parse_search(body: &str) -> Result<Vec<Book>, CatalogError> {
    let envelope: SearchEnvelope =
        quick_xml::de::from_str(body).map_err(|e| CatalogError::decode(e.to_string()))?;
    Ok(envelope
        .search
        .results
        .works
        .into_iter()
        .map(Book::from)
        .collect())
}

fn parse_shelves(body: &str) -> Result<Vec<Shelf>, CatalogError> {
    let envelope: ShelvesEnvelope =
        quick_xml::de::from_str(body).map_err(|e| CatalogError::decode(e.to_string()))?;
    Ok(envelope
        .shelves
        .shelves
        .into_iter()
        .map(|s| Shelf {
            id: s.id,
            name: s.name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogErrorKind;

    const SEARCH_BODY: &str = r"
        <GoodreadsResponse>
          <search>
            <results>
              <work>
                <average_rating>4.23</average_rating>
                <best_book>
                  <id>42</id>
                  <title>Dune</title>
                  <author>
                    <name>Frank Herbert</name>
                  </author>
                </best_book>
              </work>
              <work>
                <average_rating>3.9</average_rating>
                <best_book>
                  <id>99</id>
                  <title>Dune Messiah</title>
                  <author>
                    <name>Frank Herbert</name>
                  </author>
                </best_book>
              </work>
            </results>
          </search>
        </GoodreadsResponse>";

    #[test]
    fn decodes_search_results_in_order() {
        let books = parse_search(SEARCH_BODY).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(
            books[0],
            Book {
                id: 42,
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                average_rating: 4.23,
            }
        );
        assert_eq!(books[1].title, "Dune Messiah");
    }

    #[test]
    fn decodes_empty_search_results() {
        let body = r"
            <GoodreadsResponse>
              <search>
                <results></results>
              </search>
            </GoodreadsResponse>";
        let books = parse_search(body).unwrap();
        assert!(books.is_empty());
    }

    #[test]
    fn decodes_shelf_list() {
        let body = r"
            <GoodreadsResponse>
              <shelves>
                <user_shelf>
                  <id>1</id>
                  <name>to-read</name>
                </user_shelf>
                <user_shelf>
                  <id>2</id>
                  <name>favorites</name>
                </user_shelf>
              </shelves>
            </GoodreadsResponse>";
        let shelves = parse_shelves(body).unwrap();
        assert_eq!(
            shelves,
            vec![
                Shelf {
                    id: 1,
                    name: "to-read".to_string()
                },
                Shelf {
                    id: 2,
                    name: "favorites".to_string()
                },
            ]
        );
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = parse_search("<not-xml").unwrap_err();
        assert_eq!(err.kind, CatalogErrorKind::Decode);
    }
}
