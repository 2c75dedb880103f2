//! Book catalog.
//!
//! Catalog data is static: a JSON array of [`Book`] entries. Section
//! membership (new, bestseller, sale) is carried by explicit flags on each
//! entry instead of being inferred from how the entry is rendered.

mod filter;
mod view;

use std::path::Path;

use bookshop_core::{BookId, Price, Section};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

pub use filter::{
    CatalogFilter, DEFAULT_PRICE_MAX, SortOrder, SortOrderParseError, section_from_query,
};
pub use view::{VIEW_MODE_KEY, ViewMode};

use crate::cart::NewLineItem;

/// Errors raised while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog data is not a JSON array of books.
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share an ID.
    #[error("duplicate book id: {0}")]
    DuplicateId(BookId),
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: String,
    /// Star rating, 0 to 5.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub on_sale: bool,
    /// Pre-discount price, shown struck through for sale items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
}

impl Book {
    /// Whether the book belongs to `section`.
    #[must_use]
    pub const fn in_section(&self, section: Section) -> bool {
        match section {
            Section::New => self.is_new,
            Section::Bestseller => self.bestseller,
            Section::Sale => self.on_sale,
        }
    }

    /// The cart input for one copy of this book.
    #[must_use]
    pub fn to_line_item_input(&self) -> NewLineItem {
        NewLineItem {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// The full list of books, in display ("popularity") order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog from entries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two entries share an ID.
    pub fn new(books: Vec<Book>) -> Result<Self, CatalogError> {
        for (index, book) in books.iter().enumerate() {
            if books.iter().take(index).any(|b| b.id == book.id) {
                return Err(CatalogError::DuplicateId(book.id.clone()));
            }
        }
        Ok(Self { books })
    }

    /// Parse a JSON array of books.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate IDs.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let books: Vec<Book> = serde_json::from_str(json)?;
        Self::new(books)
    }

    /// Read a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        debug!(books = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// All books in catalog order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a book by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Number of books.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for book in &self.books {
            if !seen.contains(&book.category.as_str()) {
                seen.push(&book.category);
            }
        }
        seen
    }

    /// Books passing `filter`, ordered by `sort`.
    #[must_use]
    pub fn query(&self, filter: &CatalogFilter, sort: SortOrder) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.iter().filter(|b| filter.matches(b)).collect();
        sort.apply(&mut books);
        books
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id":"b1","title":"Dune","author":"Frank Herbert","price":"12.00","category":"Fiction","rating":5,"bestseller":true},
        {"id":"b2","title":"Cosmos","author":"Carl Sagan","price":9.5,"category":"Science","rating":4,"is_new":true,"on_sale":true,"original_price":"14.00"},
        {"id":"b3","title":"Emma","author":"Jane Austen","price":"7","category":"Fiction"}
    ]"#;

    #[test]
    fn test_from_json_defaults_flags() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let emma = catalog.get("b3").unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(emma.rating, 0);
        assert!(!emma.is_new && !emma.bestseller && !emma.on_sale);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id":"b1","title":"A","author":"X","price":"1","category":"C"},
            {"id":"b1","title":"B","author":"Y","price":"2","category":"C"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateId(id)) if id == "b1"
        ));
    }

    #[test]
    fn test_in_section() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let cosmos = catalog.get("b2").unwrap();

        assert!(cosmos.in_section(Section::New));
        assert!(cosmos.in_section(Section::Sale));
        assert!(!cosmos.in_section(Section::Bestseller));
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.categories(), ["Fiction", "Science"]);
    }

    #[test]
    fn test_to_line_item_input() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let input = catalog.get("b1").unwrap().to_line_item_input();

        assert_eq!(input.id, "b1");
        assert_eq!(input.price.to_string(), "12.00");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
