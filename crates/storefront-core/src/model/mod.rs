//! Domain model types, kept separate from the wire records in
//! `storefront-api` so the catalog schema can drift without touching
//! consumers.

mod product;

pub use product::{Product, ProductId};
