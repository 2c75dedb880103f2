//! Terminal rendering of cart and catalog state.

#![allow(clippy::print_stdout)]

use bookshop_storefront::{Book, CartStore, Receipt, Storage, ViewMode};

/// Print the cart contents and totals.
pub fn cart<S: Storage>(store: &CartStore<S>, currency: &str) {
    if store.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in store.items() {
        println!(
            "{:<10} {:<32} {:<24} {:>3} x {:>9} = {:>10} {currency}",
            item.id,
            item.title,
            item.author,
            item.quantity,
            item.price.to_string(),
            item.line_total().to_string(),
        );
    }
    println!();
    println!("Items: {}", store.total_items());
    println!("Total: {} {currency}", store.total_price());
}

/// Print a completed order.
pub fn receipt(receipt: &Receipt, currency: &str) {
    println!("Order {} placed at {}", receipt.order_number, receipt.placed_at.to_rfc3339());
    for line in &receipt.lines {
        println!("  {} x {} ({})", line.quantity, line.title, line.line_total());
    }
    println!("Items: {}", receipt.total_items);
    println!("Total: {} {currency}", receipt.total);
}

/// Print catalog query results in the chosen layout.
pub fn books(books: &[&Book], view: ViewMode, currency: &str) {
    println!("{} books", books.len());
    for book in books {
        let badges = badges(book);
        match view {
            ViewMode::Grid => println!(
                "[{}] {} / {} / {} {currency}{badges}",
                book.id, book.title, book.author, book.price
            ),
            ViewMode::List => {
                println!("[{}] {}{badges}", book.id, book.title);
                println!("    by {}, {}", book.author, book.category);
                match &book.original_price {
                    Some(original) => {
                        println!("    {} {currency} (was {original})", book.price);
                    }
                    None => println!("    {} {currency}", book.price),
                }
                println!("    rating {}/5", book.rating);
            }
        }
    }
}

fn badges(book: &Book) -> String {
    let mut out = String::new();
    if book.is_new {
        out.push_str(" [new]");
    }
    if book.bestseller {
        out.push_str(" [bestseller]");
    }
    if book.on_sale {
        out.push_str(" [sale]");
    }
    out
}
