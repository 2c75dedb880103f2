//! Integration tests for catalog queries.

#![allow(clippy::unwrap_used)]

use bookshop_core::Section;
use bookshop_integration_tests::SAMPLE_CATALOG;
use bookshop_storefront::{Catalog, CatalogFilter, CartStore, MemoryStorage, SortOrder};
use rust_decimal::Decimal;

fn ids(books: &[&bookshop_storefront::Book]) -> Vec<String> {
    books.iter().map(|b| b.id.to_string()).collect()
}

#[test]
fn test_default_filter_hides_books_over_default_max() {
    let catalog = Catalog::from_json(SAMPLE_CATALOG).unwrap();
    let books = catalog.query(&CatalogFilter::default(), SortOrder::Popularity);
    assert_eq!(ids(&books), ["b1", "b2", "b3", "b4"]);
}

#[test]
fn test_section_from_page_query() {
    let catalog = Catalog::from_json(SAMPLE_CATALOG).unwrap();

    let sale = catalog.query(&CatalogFilter::from_query("?section=sale"), SortOrder::PriceAsc);
    assert_eq!(ids(&sale), ["b3", "b4"]);

    let new = catalog.query(&CatalogFilter::for_section(Section::New), SortOrder::Popularity);
    assert_eq!(ids(&new), ["b2", "b4"]);
}

#[test]
fn test_category_and_price_with_rating_sort() {
    let catalog = Catalog::from_json(SAMPLE_CATALOG).unwrap();
    let filter = CatalogFilter {
        categories: vec!["Fiction".to_string(), "History".to_string()],
        price_min: Decimal::new(20, 0),
        price_max: Decimal::new(5, 0),
        ..CatalogFilter::default()
    };

    let books = catalog.query(&filter, SortOrder::Rating);

    assert_eq!(ids(&books), ["b1", "b4"]);
}

#[test]
fn test_add_query_results_to_cart() {
    let catalog = Catalog::from_json(SAMPLE_CATALOG).unwrap();
    let mut cart = CartStore::open(MemoryStorage::new());

    for book in catalog.query(&CatalogFilter::for_section(Section::Sale), SortOrder::Popularity) {
        cart.add(book.to_line_item_input());
    }

    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price(), "20.24");
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, SAMPLE_CATALOG).unwrap();

    let catalog = Catalog::load(&path).unwrap();

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.categories(), ["Fiction", "Science", "History", "Reference"]);
}
