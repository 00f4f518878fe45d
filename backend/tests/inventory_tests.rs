//! Inventory adjustment tests
//!
//! Covers stock arithmetic and the before/after pair recorded in the
//! inventory change log.

use proptest::prelude::*;
use shared::{apply_adjustment, StockChange, StockError};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_restock_records_old_and_new_levels() {
        let change = apply_adjustment(100, 20).unwrap();
        assert_eq!(
            change,
            StockChange {
                old_stock: 100,
                current_stock: 120
            }
        );
    }

    #[test]
    fn test_negative_adjustment_is_not_floored() {
        let change = apply_adjustment(5, -8).unwrap();
        assert_eq!(change.current_stock, -3);
        assert_eq!(change.delta(), -8);
    }

    #[test]
    fn test_zero_adjustment_keeps_level() {
        let change = apply_adjustment(42, 0).unwrap();
        assert_eq!(change.old_stock, 42);
        assert_eq!(change.current_stock, 42);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            apply_adjustment(i32::MAX, 10),
            Err(StockError::Overflow {
                current: i32::MAX,
                delta: 10
            })
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn stock_strategy() -> impl Strategy<Value = i32> {
        -10_000i32..100_000
    }

    fn delta_strategy() -> impl Strategy<Value = i32> {
        -10_000i32..10_000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// New stock equals old stock plus the delta, and the log row says so
        #[test]
        fn prop_adjustment_is_additive(
            stock in stock_strategy(),
            delta in delta_strategy()
        ) {
            let change = apply_adjustment(stock, delta).unwrap();

            prop_assert_eq!(change.old_stock, stock);
            prop_assert_eq!(change.current_stock, stock + delta);
            prop_assert_eq!(change.delta(), i64::from(delta));
        }

        /// Replaying a change log reproduces the final stock
        #[test]
        fn prop_change_log_replays_to_final_stock(
            initial in stock_strategy(),
            deltas in prop::collection::vec(delta_strategy(), 0..20)
        ) {
            let mut stock = initial;
            let mut log = Vec::new();
            for delta in &deltas {
                let change = apply_adjustment(stock, *delta).unwrap();
                stock = change.current_stock;
                log.push(change);
            }

            // Consecutive rows chain old_stock to the previous current_stock
            for pair in log.windows(2) {
                prop_assert_eq!(pair[0].current_stock, pair[1].old_stock);
            }

            let replayed = log.iter().fold(i64::from(initial), |acc, c| acc + c.delta());
            prop_assert_eq!(replayed, i64::from(stock));
        }

        /// Overflowing adjustments never produce a change
        #[test]
        fn prop_overflow_never_wraps(delta in 1i32..i32::MAX) {
            prop_assert!(apply_adjustment(i32::MAX, delta).is_err());
            prop_assert!(apply_adjustment(i32::MIN, -delta).is_err());
        }
    }
}
