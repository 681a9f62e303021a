//! Thread-safe item storage and the read seam carts use to see it.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use shop_core::{
    AggregateRoot, Bounds, DEFAULT_LIMIT, IdSequence, ItemId, Pagination, ShopError, ShopResult,
};

use crate::item::{Item, ItemDraft, ItemPatch};

/// Raw listing parameters, validated by [`ItemCatalog::list`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemQuery {
    pub offset: i64,
    pub limit: i64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Include soft-deleted items.
    pub show_deleted: bool,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            min_price: None,
            max_price: None,
            show_deleted: false,
        }
    }
}

impl ItemQuery {
    pub fn page(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }
}

/// Read-only view of the catalog used by dependents (the cart store).
///
/// Implementations must never call back into their dependents.
pub trait ItemLookup: Send + Sync {
    /// Current state of one item, deleted or not.
    fn lookup(&self, id: ItemId) -> Option<Item>;

    /// Current state of several items, read as one point-in-time snapshot.
    fn lookup_many(&self, ids: &[ItemId]) -> HashMap<ItemId, Item>;
}

impl<S> ItemLookup for Arc<S>
where
    S: ItemLookup + ?Sized,
{
    fn lookup(&self, id: ItemId) -> Option<Item> {
        (**self).lookup(id)
    }

    fn lookup_many(&self, ids: &[ItemId]) -> HashMap<ItemId, Item> {
        (**self).lookup_many(ids)
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    items: BTreeMap<ItemId, Item>,
    ids: IdSequence<ItemId>,
}

/// In-memory item catalog.
///
/// One `RwLock` guards the whole map and the id sequence: writers are
/// serialized, readers run concurrently with each other.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    state: RwLock<CatalogState>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation validates before touching state, so a poisoned guard
    // still holds consistent data.
    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an active item under the next sequential id.
    pub fn add(&self, draft: ItemDraft) -> ShopResult<Item> {
        draft.validate()?;

        let mut state = self.write();
        let id = state.ids.allocate();
        let item = Item::create(id, draft);
        state.items.insert(id, item.clone());

        tracing::debug!(item_id = %id, name = item.name(), price = item.price(), "item added");
        Ok(item)
    }

    /// Fetch an item regardless of its deleted state.
    pub fn get(&self, id: ItemId) -> ShopResult<Item> {
        self.read()
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| ShopError::item_not_found(id))
    }

    /// Filter by price bounds and visibility, keep ascending id order, then page.
    pub fn list(&self, query: &ItemQuery) -> ShopResult<Vec<Item>> {
        let page = Pagination::new(query.offset, query.limit)?;
        let prices = Bounds::price(query.min_price, query.max_price)?;

        let state = self.read();
        let matching = state
            .items
            .values()
            .filter(|item| query.show_deleted || item.is_active())
            .filter(|item| prices.contains(item.price()))
            .cloned();

        Ok(page.apply(matching))
    }

    /// Overwrite name and price of an active item.
    pub fn replace(&self, id: ItemId, draft: ItemDraft) -> ShopResult<Item> {
        let mut state = self.write();
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| ShopError::item_not_found(id))?;
        item.replace(draft)?;

        tracing::debug!(item_id = %id, version = item.version(), "item replaced");
        Ok(item.clone())
    }

    /// Apply the present fields of `patch` to an active item.
    pub fn patch(&self, id: ItemId, patch: ItemPatch) -> ShopResult<Item> {
        let mut state = self.write();
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| ShopError::item_not_found(id))?;
        item.patch(patch)?;

        tracing::debug!(item_id = %id, version = item.version(), "item patched");
        Ok(item.clone())
    }

    /// Soft delete. Deleting an already-deleted item returns it unchanged.
    pub fn delete(&self, id: ItemId) -> ShopResult<Item> {
        let mut state = self.write();
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| ShopError::item_not_found(id))?;

        if item.mark_deleted() {
            tracing::info!(item_id = %id, "item soft-deleted");
        }
        Ok(item.clone())
    }

    /// Number of items ever created (deleted ones included).
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ItemLookup for ItemCatalog {
    fn lookup(&self, id: ItemId) -> Option<Item> {
        self.read().items.get(&id).cloned()
    }

    fn lookup_many(&self, ids: &[ItemId]) -> HashMap<ItemId, Item> {
        let state = self.read();
        ids.iter()
            .filter_map(|id| state.items.get(id).map(|item| (*id, item.clone())))
            .collect()
    }
}
