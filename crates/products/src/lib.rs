//! Products domain module.
//!
//! This crate contains the stock-keeping rules for a single product,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::{Product, QuantityChange};
pub use shopkeep_core::{Money, ProductId};
