//! Filtering and pagination primitives shared by catalog and cart listings.
//!
//! Listing is always: filter, keep ascending id order, then page. All inputs
//! are validated up front so a bad query never touches store state.

use serde::{Deserialize, Serialize};

use crate::error::{ShopError, ShopResult};

/// Default page size when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Validated offset/limit window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    offset: usize,
    limit: usize,
}

impl Pagination {
    /// Validate a raw window: `offset >= 0` and `limit > 0`.
    pub fn new(offset: i64, limit: i64) -> ShopResult<Self> {
        if offset < 0 {
            return Err(ShopError::invalid_argument(format!(
                "offset must be non-negative (got {offset})"
            )));
        }
        if limit <= 0 {
            return Err(ShopError::invalid_argument(format!(
                "limit must be positive (got {limit})"
            )));
        }
        Ok(Self {
            offset: usize::try_from(offset).unwrap_or(usize::MAX),
            limit: usize::try_from(limit).unwrap_or(usize::MAX),
        })
    }

    /// Take this page out of an already filtered, ordered sequence.
    pub fn apply<T, I>(&self, iter: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

/// Inclusive, optionally open-ended range filter.
///
/// Inverted bounds (`min > max`) are accepted and simply match nothing.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl Bounds<f64> {
    /// Price bounds: each present bound must be finite and non-negative.
    pub fn price(min: Option<f64>, max: Option<f64>) -> ShopResult<Self> {
        for (label, bound) in [("min_price", min), ("max_price", max)] {
            if let Some(value) = bound {
                validate_non_negative(label, value)?;
            }
        }
        Ok(Self { min, max })
    }
}

impl Bounds<u64> {
    /// Quantity bounds: each present bound must be non-negative.
    pub fn quantity(min: Option<i64>, max: Option<i64>) -> ShopResult<Self> {
        let convert = |label: &str, bound: Option<i64>| -> ShopResult<Option<u64>> {
            bound
                .map(|value| {
                    u64::try_from(value).map_err(|_| {
                        ShopError::invalid_argument(format!(
                            "{label} must be non-negative (got {value})"
                        ))
                    })
                })
                .transpose()
        };
        Ok(Self {
            min: convert("min_quantity", min)?,
            max: convert("max_quantity", max)?,
        })
    }
}

/// Validate an item price: finite and `>= 0`.
pub fn validate_price(price: f64) -> ShopResult<f64> {
    validate_non_negative("price", price)
}

fn validate_non_negative(label: &str, value: f64) -> ShopResult<f64> {
    if !value.is_finite() {
        return Err(ShopError::invalid_argument(format!(
            "{label} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(ShopError::invalid_argument(format!(
            "{label} must be non-negative (got {value})"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rejects_negative_offset_and_non_positive_limit() {
        assert!(Pagination::new(-1, 10).unwrap_err().is_invalid_argument());
        assert!(Pagination::new(0, 0).unwrap_err().is_invalid_argument());
        assert!(Pagination::new(0, -3).unwrap_err().is_invalid_argument());
        assert!(Pagination::new(0, 1).is_ok());
    }

    #[test]
    fn pagination_applies_offset_then_limit() {
        let page = Pagination::new(2, 3).unwrap();
        assert_eq!(page.apply(1..=10), vec![3, 4, 5]);

        let past_end = Pagination::new(20, 3).unwrap();
        assert!(past_end.apply(1..=10).is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = Bounds::price(Some(1.0), Some(2.0)).unwrap();
        assert!(bounds.contains(1.0));
        assert!(bounds.contains(2.0));
        assert!(!bounds.contains(2.01));
        assert!(Bounds::price(None, None).unwrap().contains(1e9));
    }

    #[test]
    fn inverted_bounds_match_nothing() {
        let bounds = Bounds::price(Some(10.0), Some(5.0)).unwrap();
        assert!(!bounds.contains(5.0));
        assert!(!bounds.contains(7.5));
        assert!(!bounds.contains(10.0));
    }

    #[test]
    fn price_bounds_reject_negative_and_nan() {
        assert!(Bounds::price(Some(-0.5), None).is_err());
        assert!(Bounds::price(None, Some(f64::NAN)).is_err());
        assert!(Bounds::price(Some(0.0), Some(f64::MAX)).is_ok());
    }

    #[test]
    fn quantity_bounds_reject_negative() {
        let err = Bounds::quantity(Some(-1), None).unwrap_err();
        assert!(err.to_string().contains("min_quantity"));
        let ok = Bounds::quantity(Some(0), Some(3)).unwrap();
        assert!(ok.contains(3));
        assert!(!ok.contains(4));
    }

    #[test]
    fn price_validation() {
        assert_eq!(validate_price(0.0).unwrap(), 0.0);
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: consecutive pages of size N are disjoint and, concatenated,
            /// reproduce the original order.
            #[test]
            fn consecutive_pages_partition_the_sequence(
                len in 0usize..60,
                n in 1i64..15
            ) {
                let all: Vec<usize> = (0..len).collect();
                let mut rebuilt = Vec::new();
                let mut offset = 0i64;
                loop {
                    let page = Pagination::new(offset, n).unwrap().apply(all.iter().copied());
                    if page.is_empty() {
                        break;
                    }
                    rebuilt.extend(page);
                    offset += n;
                }
                prop_assert_eq!(rebuilt, all);
            }
        }
    }
}
