//! Store error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the shop stores.
pub type ShopResult<T> = Result<T, ShopError>;

/// Which kind of record an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Cart,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntityKind::Item => f.write_str("item"),
            EntityKind::Cart => f.write_str("cart"),
        }
    }
}

/// Store-level error.
///
/// Every error is deterministic given the same input and store state; nothing
/// here is transient and nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// The referenced id was never issued (or, for `add_item`, the item is deleted).
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    /// The target is in a terminal state and cannot be changed.
    #[error("{entity} {id} not modified: {reason}")]
    NotModified {
        entity: EntityKind,
        id: u64,
        reason: String,
    },

    /// Caller supplied an out-of-range value (offset, limit, price, quantity).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ShopError {
    pub fn item_not_found(id: impl Into<u64>) -> Self {
        Self::NotFound {
            entity: EntityKind::Item,
            id: id.into(),
        }
    }

    pub fn cart_not_found(id: impl Into<u64>) -> Self {
        Self::NotFound {
            entity: EntityKind::Cart,
            id: id.into(),
        }
    }

    pub fn item_not_modified(id: impl Into<u64>, reason: impl Into<String>) -> Self {
        Self::NotModified {
            entity: EntityKind::Item,
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::NotModified { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Entity the error refers to, if any.
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Self::NotFound { entity, .. } | Self::NotModified { entity, .. } => Some(*entity),
            Self::InvalidArgument(_) => None,
        }
    }

    /// Conventional HTTP status for the API layer that sits on top of the stores.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::NotModified { .. } => 304,
            Self::InvalidArgument(_) => 422,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = ShopError::cart_not_found(7u64);
        assert_eq!(err.to_string(), "cart 7 not found");
        assert_eq!(err.entity(), Some(EntityKind::Cart));
        assert!(err.is_not_found());
        assert_eq!(err.status_hint(), 404);
    }

    #[test]
    fn not_modified_carries_reason() {
        let err = ShopError::item_not_modified(3u64, "item is deleted");
        assert_eq!(err.to_string(), "item 3 not modified: item is deleted");
        assert!(err.is_not_modified());
        assert_eq!(err.status_hint(), 304);
    }

    #[test]
    fn invalid_argument_has_no_entity() {
        let err = ShopError::invalid_argument("limit must be positive");
        assert_eq!(err.entity(), None);
        assert!(err.is_invalid_argument());
        assert_eq!(err.status_hint(), 422);
    }
}
