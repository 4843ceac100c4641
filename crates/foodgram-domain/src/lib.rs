//! Domain types shared across Foodgram crates.
//!
//! This crate contains only pure types and algorithms with no framework or
//! database dependencies. Import in `usecase/` and `domain/` layers.

pub mod image;
pub mod pagination;
pub mod shopping_list;
pub mod short_code;
