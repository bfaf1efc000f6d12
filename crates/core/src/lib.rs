//! `shopkeep-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the product and
//! store crates (no IO, no logging setup).

pub mod amount;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;

pub use amount::parse_amount;
pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use id::ProductId;
pub use money::Money;
