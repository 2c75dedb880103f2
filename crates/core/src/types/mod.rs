//! Core types for the bookshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod section;

pub use id::BookId;
pub use price::{Price, PriceError};
pub use section::{Section, SectionParseError};
