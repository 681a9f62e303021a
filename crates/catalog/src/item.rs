//! Item record plus the draft and patch inputs that mutate it.

use serde::{Deserialize, Serialize};

use shop_core::{AggregateRoot, ItemId, ShopError, ShopResult, validate_price};

/// Input for `add` and `replace`: every mutable field, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub price: f64,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn validate(&self) -> ShopResult<()> {
        validate_price(self.price)?;
        Ok(())
    }
}

/// Partial update. `deleted` is deliberately not representable here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ItemPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: None,
        }
    }

    pub fn price(price: f64) -> Self {
        Self {
            name: None,
            price: Some(price),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    pub fn validate(&self) -> ShopResult<()> {
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Aggregate root: Item.
///
/// Lifecycle is `Active --delete--> Deleted`; deleted is terminal and the
/// record stays in the catalog for lookups and cart reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    price: f64,
    deleted: bool,
    #[serde(skip, default = "initial_version")]
    version: u64,
}

fn initial_version() -> u64 {
    1
}

impl Item {
    /// Build a fresh, active item. The draft must already be validated.
    pub(crate) fn create(id: ItemId, draft: ItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            deleted: false,
            version: initial_version(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    fn ensure_active(&self) -> ShopResult<()> {
        if self.deleted {
            return Err(ShopError::item_not_modified(
                self.id,
                "item is deleted and cannot be modified",
            ));
        }
        Ok(())
    }

    pub(crate) fn replace(&mut self, draft: ItemDraft) -> ShopResult<()> {
        draft.validate()?;
        self.ensure_active()?;
        self.name = draft.name;
        self.price = draft.price;
        self.version += 1;
        Ok(())
    }

    pub(crate) fn patch(&mut self, patch: ItemPatch) -> ShopResult<()> {
        patch.validate()?;
        self.ensure_active()?;
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        self.version += 1;
        Ok(())
    }

    /// Soft delete. Returns `false` when the item was already deleted.
    pub(crate) fn mark_deleted(&mut self) -> bool {
        if self.deleted {
            return false;
        }
        self.deleted = true;
        self.version += 1;
        true
    }
}

impl AggregateRoot for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
