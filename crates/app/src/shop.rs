//! Composition root: one catalog, one cart store, shared configuration.

use std::sync::Arc;

use shop_carts::{Cart, CartQuery, CartStore};
use shop_catalog::{Item, ItemCatalog, ItemQuery};
use shop_core::ShopResult;

use crate::config::ShopConfig;

/// Both stores, wired together.
///
/// Constructed once per process and handed to the API layer by reference;
/// there is no global state.
#[derive(Debug)]
pub struct Shop {
    config: ShopConfig,
    items: Arc<ItemCatalog>,
    carts: CartStore<Arc<ItemCatalog>>,
}

impl Shop {
    pub fn new(config: ShopConfig) -> Self {
        let items = Arc::new(ItemCatalog::new());
        let carts = CartStore::new(Arc::clone(&items));
        Self {
            config,
            items,
            carts,
        }
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn carts(&self) -> &CartStore<Arc<ItemCatalog>> {
        &self.carts
    }

    /// Item query seeded with the configured page size.
    pub fn item_query(&self) -> ItemQuery {
        ItemQuery::page(0, self.config.default_page_size)
    }

    /// Cart query seeded with the configured page size.
    pub fn cart_query(&self) -> CartQuery {
        CartQuery::page(0, self.config.default_page_size)
    }

    /// [`ItemCatalog::list`] with the limit capped at `max_page_size`.
    pub fn list_items(&self, query: &ItemQuery) -> ShopResult<Vec<Item>> {
        let capped = ItemQuery {
            limit: self.cap(query.limit),
            ..query.clone()
        };
        self.items.list(&capped)
    }

    /// [`CartStore::list`] with the limit capped at `max_page_size`.
    pub fn list_carts(&self, query: &CartQuery) -> ShopResult<Vec<Cart>> {
        let capped = CartQuery {
            limit: self.cap(query.limit),
            ..query.clone()
        };
        self.carts.list(&capped)
    }

    // Non-positive limits pass through untouched so the store rejects them.
    fn cap(&self, limit: i64) -> i64 {
        limit.min(self.config.max_page_size)
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new(ShopConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_catalog::ItemDraft;
    use shop_core::AggregateRoot;

    fn small_pages() -> ShopConfig {
        ShopConfig {
            default_page_size: 2,
            max_page_size: 3,
            ..ShopConfig::default()
        }
    }

    #[test]
    fn seeded_queries_use_configured_page_size() {
        let shop = Shop::new(small_pages());
        for i in 0..5 {
            shop.items().add(ItemDraft::new(format!("i{i}"), 1.0)).unwrap();
        }
        assert_eq!(shop.list_items(&shop.item_query()).unwrap().len(), 2);
    }

    #[test]
    fn oversized_limits_are_capped() {
        let shop = Shop::new(small_pages());
        for i in 0..5 {
            shop.items().add(ItemDraft::new(format!("i{i}"), 1.0)).unwrap();
            shop.carts().create();
        }
        assert_eq!(shop.list_items(&ItemQuery::page(0, 100)).unwrap().len(), 3);
        assert_eq!(shop.list_carts(&CartQuery::page(0, 100)).unwrap().len(), 3);
    }

    #[test]
    fn invalid_limits_still_fail() {
        let shop = Shop::default();
        let err = shop.list_items(&ItemQuery::page(0, 0)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn carts_see_items_from_the_same_catalog() {
        let shop = Shop::default();
        let milk = shop.items().add(ItemDraft::new("milk", 2.5)).unwrap();
        let cart = shop.carts().create();
        let cart = shop.carts().add_item(cart.id, milk.id()).unwrap();
        assert_eq!(cart.price, 2.5);
    }
}
