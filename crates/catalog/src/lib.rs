//! Item catalog.
//!
//! Owns item records (name, price, soft-delete flag). The catalog knows nothing
//! about carts; carts read it through [`ItemLookup`].

pub mod catalog;
pub mod item;

pub use catalog::{ItemCatalog, ItemLookup, ItemQuery};
pub use item::{Item, ItemDraft, ItemPatch};
