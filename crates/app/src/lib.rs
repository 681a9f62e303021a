//! Shop composition: configuration plus the wired item catalog and cart store.
//!
//! HTTP routing and serialization live outside this workspace; they talk to
//! [`Shop`] through the typed store operations.

pub mod config;
pub mod shop;

pub use config::{ConfigError, ShopConfig};
pub use shop::Shop;
