//! Catalog commands.

use bookshop_core::Section;
use bookshop_storefront::{Catalog, CatalogFilter, SortOrder, StorefrontConfig, ViewMode};
use rust_decimal::Decimal;
use tracing::info;

use super::CommandError;
use crate::render;

/// Combine a page query string with explicit filter flags.
///
/// Sections from the query come first; explicit flags are added on top.
pub fn build_filter(
    query: Option<&str>,
    sections: Vec<Section>,
    categories: Vec<String>,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> CatalogFilter {
    let mut filter = query.map_or_else(CatalogFilter::default, CatalogFilter::from_query);
    for section in sections {
        if !filter.sections.contains(&section) {
            filter.sections.push(section);
        }
    }
    filter.categories = categories;
    if let Some(min) = min {
        filter.price_min = min;
    }
    if let Some(max) = max {
        filter.price_max = max;
    }
    filter
}

/// Print books matching `filter`.
///
/// # Errors
///
/// Returns an error if no catalog is configured or it cannot be loaded.
pub fn list(
    config: &StorefrontConfig,
    filter: &CatalogFilter,
    sort: SortOrder,
) -> Result<(), CommandError> {
    let path = config.catalog_path.as_ref().ok_or(CommandError::NoCatalog)?;
    let catalog = Catalog::load(path)?;
    let view = ViewMode::load(&config.storage());

    let books = catalog.query(filter, sort);
    render::books(&books, view, &config.currency);
    Ok(())
}

/// Show or change the saved view mode.
///
/// # Errors
///
/// Returns an error if the mode is not recognized or cannot be saved.
pub fn view(config: &StorefrontConfig, mode: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut storage = config.storage();
    let current = ViewMode::load(&storage);

    let next = match mode {
        None => {
            info!("View mode: {current}");
            return Ok(());
        }
        Some("toggle") => current.toggled(),
        Some(other) => other.parse::<ViewMode>()?,
    };

    next.save(&mut storage)?;
    info!("View mode: {next}");
    Ok(())
}
