//! Store domain module.
//!
//! A store owns an ordered catalogue of products and a money balance. Ordering
//! (restocking) is costless; selling moves stock into money.

pub mod store;

pub use store::{MarkupReport, Restock, SaleOutcome, Store};
