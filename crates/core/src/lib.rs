//! `shop-core`: shared building blocks for the shop stores.
//!
//! This crate contains **pure domain** primitives (no locking, no storage).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod query;

pub use aggregate::AggregateRoot;
pub use error::{EntityKind, ShopError, ShopResult};
pub use id::{CartId, IdSequence, ItemId};
pub use query::{Bounds, DEFAULT_LIMIT, Pagination, validate_price};
