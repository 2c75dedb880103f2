//! Catalog filtering and sorting.

use bookshop_core::Section;
use rust_decimal::Decimal;
use thiserror::Error;

use super::Book;

/// Upper bound of the price filter when none is given.
pub const DEFAULT_PRICE_MAX: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Which books to show.
///
/// Every selected criterion must hold: the book's category is one of
/// `categories` (or none are selected), it is in every selected section, and
/// its price lies in the inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    pub categories: Vec<String>,
    pub sections: Vec<Section>,
    pub price_min: Decimal,
    pub price_max: Decimal,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            sections: Vec::new(),
            price_min: Decimal::ZERO,
            price_max: DEFAULT_PRICE_MAX,
        }
    }
}

impl CatalogFilter {
    /// A filter selecting a single section.
    #[must_use]
    pub fn for_section(section: Section) -> Self {
        Self {
            sections: vec![section],
            ..Self::default()
        }
    }

    /// Pre-select filters from a page query string such as `section=sale`.
    ///
    /// Unknown parameters and values are ignored.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        section_from_query(query).map_or_else(Self::default, Self::for_section)
    }

    /// The price bounds, swapped if entered the wrong way round.
    #[must_use]
    pub fn price_range(&self) -> (Decimal, Decimal) {
        if self.price_min <= self.price_max {
            (self.price_min, self.price_max)
        } else {
            (self.price_max, self.price_min)
        }
    }

    /// Whether `book` passes the filter.
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        if !self.categories.is_empty() && !self.categories.iter().any(|c| *c == book.category) {
            return false;
        }
        if !self.sections.iter().all(|s| book.in_section(*s)) {
            return false;
        }
        let (min, max) = self.price_range();
        let price = book.price.amount();
        price >= min && price <= max
    }
}

/// Read the `section` parameter from a query string.
///
/// Accepts an optional leading `?` and percent-encoded values; the section
/// name is case-insensitive. When the parameter repeats, the last one wins.
#[must_use]
pub fn section_from_query(query: &str) -> Option<Section> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .rfind(|(key, _)| *key == "section")
        .filter(|(_, value)| !value.is_empty())
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .and_then(|value| value.parse().ok())
}

/// Error returned when a sort order name is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid sort order: {0} (expected popularity, price-asc, price-desc or rating)")]
pub struct SortOrderParseError(String);

/// Ordering of query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Popularity,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Highest rated first.
    Rating,
}

impl SortOrder {
    /// Sort `books` in place. Ties keep catalog order.
    pub fn apply(self, books: &mut [&Book]) {
        match self {
            Self::Popularity => {}
            Self::PriceAsc => books.sort_by_key(|b| b.price),
            Self::PriceDesc => books.sort_by_key(|b| std::cmp::Reverse(b.price)),
            Self::Rating => books.sort_by_key(|b| std::cmp::Reverse(b.rating)),
        }
    }

    /// The name accepted by [`str::parse`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Rating => "rating",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            _ => Err(SortOrderParseError(s.to_owned())),
        }
    }
}
