//! Bookshop CLI - cart and catalog front end.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! bookshop cart show
//!
//! # Add a book from the catalog, or describe it inline
//! bookshop --catalog catalog.json cart add b1
//! bookshop cart add b1 --title "Dune" --author "Frank Herbert" --price 10.50
//!
//! # Change quantities
//! bookshop cart set b1 3
//! bookshop cart inc b1
//! bookshop cart dec b1
//!
//! # Place the (stub) order
//! bookshop cart checkout
//!
//! # Browse the catalog
//! bookshop --catalog catalog.json catalog list --section sale --sort price-asc
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and change the persisted cart
//! - `catalog` - Filter and sort the catalog, switch grid/list view

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bookshop_core::Section;
use bookshop_storefront::{SortOrder, StorefrontConfig};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "bookshop")]
#[command(author, version, about = "Bookshop cart and catalog tools")]
struct Cli {
    /// Directory holding the persisted cart and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog JSON file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart contents and totals
    Show,
    /// Add one copy of a book
    Add {
        /// Book ID
        id: String,

        /// Title (taken from the catalog when omitted)
        #[arg(long)]
        title: Option<String>,

        /// Author (taken from the catalog when omitted)
        #[arg(long)]
        author: Option<String>,

        /// Unit price, e.g. 10.50 (taken from the catalog when omitted)
        #[arg(long)]
        price: Option<String>,

        /// Cover image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a book
    Remove {
        /// Book ID
        id: String,
    },
    /// Set the quantity of a book; below 1 removes it
    Set {
        /// Book ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase the quantity of a book by one
    Inc {
        /// Book ID
        id: String,
    },
    /// Decrease the quantity of a book by one
    Dec {
        /// Book ID
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Place the order and empty the cart
    Checkout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List books matching the filters
    List {
        /// Only books in this section (`new`, `bestseller`, `sale`)
        #[arg(long)]
        section: Vec<Section>,

        /// Only books in these categories
        #[arg(long)]
        category: Vec<String>,

        /// Minimum price
        #[arg(long)]
        min: Option<Decimal>,

        /// Maximum price
        #[arg(long)]
        max: Option<Decimal>,

        /// Page query string to pre-select filters from, e.g. `section=sale`
        #[arg(long)]
        query: Option<String>,

        /// Sort order (`popularity`, `price-asc`, `price-desc`, `rating`)
        #[arg(long, default_value_t = SortOrder::Popularity)]
        sort: SortOrder,
    },
    /// Show or change the grid/list view preference
    View {
        /// `grid`, `list` or `toggle`; omit to show the current mode
        mode: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }

    match cli.command {
        Commands::Cart { action } => {
            let mut session = commands::cart::CartSession::open(&config);
            match action {
                CartAction::Show => session.show(),
                CartAction::Add {
                    id,
                    title,
                    author,
                    price,
                    image,
                } => {
                    let item = commands::cart::resolve_item(
                        &config,
                        &id,
                        commands::cart::ItemOverrides {
                            title,
                            author,
                            price,
                            image,
                        },
                    )?;
                    session.add(item);
                }
                CartAction::Remove { id } => session.remove(&id),
                CartAction::Set { id, quantity } => session.set_quantity(&id, quantity),
                CartAction::Inc { id } => session.step(&id, 1),
                CartAction::Dec { id } => session.step(&id, -1),
                CartAction::Clear => session.clear(),
                CartAction::Checkout => session.checkout()?,
            }
        }
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                section,
                category,
                min,
                max,
                query,
                sort,
            } => {
                let filter = commands::catalog::build_filter(
                    query.as_deref(),
                    section,
                    category,
                    min,
                    max,
                );
                commands::catalog::list(&config, &filter, sort)?;
            }
            CatalogAction::View { mode } => commands::catalog::view(&config, mode.as_deref())?,
        },
    }
    Ok(())
}
