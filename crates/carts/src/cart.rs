//! Cart records and their read-time projection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use shop_catalog::Item;
use shop_core::{AggregateRoot, CartId, ItemId};

/// One distinct item in a cart, as reconciled against the catalog at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub item_id: ItemId,
    /// Item name as of this read.
    pub name: String,
    pub quantity: u64,
    /// `false` once the referenced item has been soft-deleted.
    pub available: bool,
    /// Sum of the item prices observed at each add. Counts toward the cart
    /// price only while `available`. Not part of the wire shape.
    #[serde(skip_serializing, default)]
    pub price: f64,
}

/// Cart as seen by callers: lines plus the derived total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub items: Vec<CartLine>,
    pub price: f64,
    #[serde(skip, default)]
    version: u64,
}

impl Cart {
    /// Sum of line quantities, unavailable lines included.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.item_id == item_id)
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoredLine {
    item_id: ItemId,
    name: String,
    quantity: u64,
    subtotal: f64,
}

/// Cart state as kept by the store. Availability and the total are not stored;
/// they are derived from the catalog on every read.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoredCart {
    id: CartId,
    lines: Vec<StoredLine>,
    version: u64,
}

impl StoredCart {
    pub(crate) fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 1,
        }
    }

    pub(crate) fn id(&self) -> CartId {
        self.id
    }

    pub(crate) fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.lines.iter().map(|line| line.item_id)
    }

    /// Record one more unit of `item`, at the price it has right now.
    ///
    /// The caller guarantees `item` is active.
    pub(crate) fn add_unit(&mut self, item: &Item) {
        let item_id = item.id();
        match self.lines.iter_mut().find(|line| line.item_id == item_id) {
            Some(line) => {
                line.quantity += 1;
                line.subtotal += item.price();
                line.name = item.name().to_string();
            }
            None => self.lines.push(StoredLine {
                item_id,
                name: item.name().to_string(),
                quantity: 1,
                subtotal: item.price(),
            }),
        }
        self.version += 1;
    }

    /// Reconcile against a catalog snapshot that covers this cart's items.
    pub(crate) fn project(&self, items: &HashMap<ItemId, Item>) -> Cart {
        let lines: Vec<CartLine> = self
            .lines
            .iter()
            .map(|line| {
                let current = items.get(&line.item_id);
                CartLine {
                    item_id: line.item_id,
                    name: current
                        .map(|item| item.name().to_string())
                        .unwrap_or_else(|| line.name.clone()),
                    quantity: line.quantity,
                    available: current.is_some_and(Item::is_active),
                    price: line.subtotal,
                }
            })
            .collect();

        let price = lines
            .iter()
            .filter(|line| line.available)
            .map(|line| line.price)
            .sum();

        Cart {
            id: self.id,
            items: lines,
            price,
            version: self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_catalog::{ItemCatalog, ItemDraft, ItemLookup};

    fn snapshot(catalog: &ItemCatalog, cart: &StoredCart) -> HashMap<ItemId, Item> {
        let ids: Vec<ItemId> = cart.item_ids().collect();
        catalog.lookup_many(&ids)
    }

    #[test]
    fn empty_cart_projects_zero_price() {
        let catalog = ItemCatalog::new();
        let cart = StoredCart::new(CartId::new(1));
        let view = cart.project(&snapshot(&catalog, &cart));
        assert!(view.items.is_empty());
        assert_eq!(view.price, 0.0);
        assert_eq!(view.version(), 1);
    }

    #[test]
    fn repeated_add_increments_quantity_on_one_line() {
        let catalog = ItemCatalog::new();
        let milk = catalog.add(ItemDraft::new("milk", 2.5)).unwrap();
        let mut cart = StoredCart::new(CartId::new(1));

        cart.add_unit(&milk);
        cart.add_unit(&milk);

        let view = cart.project(&snapshot(&catalog, &cart));
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.price, 5.0);
        assert_eq!(view.total_quantity(), 2);
    }

    #[test]
    fn lines_keep_first_insertion_order() {
        let catalog = ItemCatalog::new();
        let a = catalog.add(ItemDraft::new("a", 1.0)).unwrap();
        let b = catalog.add(ItemDraft::new("b", 2.0)).unwrap();
        let mut cart = StoredCart::new(CartId::new(1));

        cart.add_unit(&b);
        cart.add_unit(&a);
        cart.add_unit(&b);

        let view = cart.project(&snapshot(&catalog, &cart));
        let order: Vec<u64> = view.items.iter().map(|l| l.item_id.get()).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn deleted_item_line_stays_but_stops_counting() {
        let catalog = ItemCatalog::new();
        let milk = catalog.add(ItemDraft::new("milk", 2.5)).unwrap();
        let bread = catalog.add(ItemDraft::new("bread", 1.0)).unwrap();
        let mut cart = StoredCart::new(CartId::new(1));
        cart.add_unit(&milk);
        cart.add_unit(&bread);

        catalog.delete(milk.id()).unwrap();

        let view = cart.project(&snapshot(&catalog, &cart));
        assert_eq!(view.items.len(), 2);
        assert!(!view.line(milk.id()).unwrap().available);
        assert!(view.line(bread.id()).unwrap().available);
        assert_eq!(view.price, 1.0);
    }

    #[test]
    fn names_are_refreshed_on_read() {
        let catalog = ItemCatalog::new();
        let milk = catalog.add(ItemDraft::new("milk", 2.5)).unwrap();
        let mut cart = StoredCart::new(CartId::new(1));
        cart.add_unit(&milk);

        catalog
            .patch(milk.id(), shop_catalog::ItemPatch::name("whole milk"))
            .unwrap();

        let view = cart.project(&snapshot(&catalog, &cart));
        assert_eq!(view.items[0].name, "whole milk");
    }

    #[test]
    fn cart_serializes_line_item_id_as_id() {
        let catalog = ItemCatalog::new();
        let milk = catalog.add(ItemDraft::new("milk", 2.5)).unwrap();
        let mut cart = StoredCart::new(CartId::new(1));
        cart.add_unit(&milk);

        let json = serde_json::to_value(cart.project(&snapshot(&catalog, &cart))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "items": [{"id": 1, "name": "milk", "quantity": 1, "available": true}],
                "price": 2.5
            })
        );
    }
}
