//! Cart store.
//!
//! Carts hold lines referencing catalog items. Availability and totals are
//! recomputed from the catalog on every read.

pub mod cart;
pub mod store;

pub use cart::{Cart, CartLine};
pub use store::{CartQuery, CartStore};
