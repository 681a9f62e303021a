//! Thread-safe cart storage backed by an item lookup.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use shop_catalog::ItemLookup;
use shop_core::{
    Bounds, CartId, DEFAULT_LIMIT, IdSequence, ItemId, Pagination, ShopError, ShopResult,
};

use crate::cart::{Cart, StoredCart};

/// Raw listing parameters, validated by [`CartStore::list`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartQuery {
    pub offset: i64,
    pub limit: i64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Bounds on the sum of all line quantities, unavailable lines included.
    pub min_quantity: Option<i64>,
    pub max_quantity: Option<i64>,
}

impl Default for CartQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            min_price: None,
            max_price: None,
            min_quantity: None,
            max_quantity: None,
        }
    }
}

impl CartQuery {
    pub fn page(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct CartState {
    carts: BTreeMap<CartId, StoredCart>,
    ids: IdSequence<CartId>,
}

/// In-memory cart store.
///
/// Reads recompute line availability and the cart price from the item catalog,
/// so item deletions show up without the catalog ever writing here.
///
/// Lock order is always cart store first, catalog second.
#[derive(Debug)]
pub struct CartStore<L> {
    items: L,
    state: RwLock<CartState>,
}

impl<L> CartStore<L>
where
    L: ItemLookup,
{
    pub fn new(items: L) -> Self {
        Self {
            items,
            state: RwLock::new(CartState::default()),
        }
    }

    // Mutations never panic halfway, so a poisoned guard still holds
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, CartState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CartState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn reconcile(&self, cart: &StoredCart) -> Cart {
        let ids: Vec<ItemId> = cart.item_ids().collect();
        cart.project(&self.items.lookup_many(&ids))
    }

    /// Create an empty cart under the next sequential id.
    pub fn create(&self) -> Cart {
        let mut state = self.write();
        let id = state.ids.allocate();
        let cart = StoredCart::new(id);
        let view = self.reconcile(&cart);
        state.carts.insert(id, cart);

        tracing::debug!(cart_id = %id, "cart created");
        view
    }

    pub fn get(&self, id: CartId) -> ShopResult<Cart> {
        let cart = self
            .read()
            .carts
            .get(&id)
            .cloned()
            .ok_or_else(|| ShopError::cart_not_found(id))?;
        Ok(self.reconcile(&cart))
    }

    /// Filter by reconciled price and total quantity, keep ascending id order,
    /// then page.
    pub fn list(&self, query: &CartQuery) -> ShopResult<Vec<Cart>> {
        let page = Pagination::new(query.offset, query.limit)?;
        let prices = Bounds::price(query.min_price, query.max_price)?;
        let quantities = Bounds::quantity(query.min_quantity, query.max_quantity)?;

        let state = self.read();
        let mut ids: Vec<ItemId> = state.carts.values().flat_map(StoredCart::item_ids).collect();
        ids.sort_unstable();
        ids.dedup();
        let snapshot = self.items.lookup_many(&ids);

        let matching = state
            .carts
            .values()
            .map(|cart| cart.project(&snapshot))
            .filter(|cart| prices.contains(cart.price))
            .filter(|cart| quantities.contains(cart.total_quantity()));

        Ok(page.apply(matching))
    }

    /// Add one unit of an active item to a cart.
    ///
    /// A deleted item is reported as not found. The unit is priced at the
    /// item's price as of this call.
    pub fn add_item(&self, cart_id: CartId, item_id: ItemId) -> ShopResult<Cart> {
        let mut state = self.write();
        let cart = state
            .carts
            .get_mut(&cart_id)
            .ok_or_else(|| ShopError::cart_not_found(cart_id))?;

        let item = self
            .items
            .lookup(item_id)
            .filter(|item| item.is_active())
            .ok_or_else(|| ShopError::item_not_found(item_id))?;

        cart.add_unit(&item);
        let view = self.reconcile(cart);

        tracing::debug!(
            cart_id = %cart_id,
            item_id = %item_id,
            price = view.price,
            "item added to cart"
        );
        Ok(view)
    }

    /// Number of carts ever created.
    pub fn len(&self) -> usize {
        self.read().carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
