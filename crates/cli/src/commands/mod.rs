//! CLI command implementations.

pub mod cart;
pub mod catalog;

use thiserror::Error;

/// Errors raised by command handlers before they reach the storefront.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The book is not in the catalog and was not described inline.
    #[error("book {0} not found in catalog; pass --title, --author and --price")]
    UnknownBook(String),

    /// A required field was not supplied.
    #[error("missing --{0}")]
    MissingField(&'static str),

    /// No catalog file was configured.
    #[error("no catalog configured; pass --catalog or set BOOKSHOP_CATALOG")]
    NoCatalog,

    #[error(transparent)]
    Price(#[from] bookshop_core::PriceError),

    #[error(transparent)]
    Catalog(#[from] bookshop_storefront::CatalogError),
}
