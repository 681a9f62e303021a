//! Strongly-typed sequential identifiers.

use core::marker::PhantomData;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ShopError;

/// Identifier of a catalog item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

/// Identifier of a cart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(u64);

macro_rules! impl_sequential_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = ShopError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ShopError::invalid_argument(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_sequential_newtype!(ItemId, "ItemId");
impl_sequential_newtype!(CartId, "CartId");

/// Monotonic id allocator.
///
/// The first issued id is 1. Ids are never reused: deleting a record does not
/// return its id to the sequence. Callers must hold their store's write lock
/// while calling [`IdSequence::allocate`].
#[derive(Debug)]
pub struct IdSequence<T> {
    last: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: From<u64>> IdSequence<T> {
    pub fn new() -> Self {
        Self {
            last: 0,
            _marker: PhantomData,
        }
    }

    /// Issue the next id.
    pub fn allocate(&mut self) -> T {
        self.last += 1;
        T::from(self.last)
    }
}

impl<T: From<u64>> Default for IdSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_one_and_increments() {
        let mut seq: IdSequence<ItemId> = IdSequence::new();
        assert_eq!(seq.allocate(), ItemId::new(1));
        assert_eq!(seq.allocate(), ItemId::new(2));
        assert_eq!(seq.allocate(), ItemId::new(3));
    }

    #[test]
    fn ids_parse_from_strings() {
        assert_eq!("42".parse::<CartId>().unwrap(), CartId::new(42));
        assert_eq!(" 5 ".parse::<ItemId>().unwrap(), ItemId::new(5));

        let err = "-1".parse::<ItemId>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("ItemId"));
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&ItemId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: CartId = serde_json::from_str("12").unwrap();
        assert_eq!(back.get(), 12);
    }
}
