//! Stock level arithmetic and the audit record it produces

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Before/after pair written to the inventory change log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    pub old_stock: i32,
    pub current_stock: i32,
}

impl StockChange {
    /// Signed difference applied by this change
    pub fn delta(&self) -> i64 {
        i64::from(self.current_stock) - i64::from(self.old_stock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("stock adjustment of {delta} on {current} overflows")]
    Overflow { current: i32, delta: i32 },
}

/// Apply a signed delta to a stock level.
///
/// No floor is enforced: a restock may be negative and the result may drop
/// below zero. Only sales refuse to oversell (see [`plan_sale_batch`]).
///
/// [`plan_sale_batch`]: crate::models::plan_sale_batch
pub fn apply_adjustment(current: i32, delta: i32) -> Result<StockChange, StockError> {
    let new_stock = current
        .checked_add(delta)
        .ok_or(StockError::Overflow { current, delta })?;

    Ok(StockChange {
        old_stock: current,
        current_stock: new_stock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restock_adds() {
        let change = apply_adjustment(50, 25).unwrap();
        assert_eq!(change.old_stock, 50);
        assert_eq!(change.current_stock, 75);
        assert_eq!(change.delta(), 25);
    }

    #[test]
    fn test_consumption_may_go_negative() {
        let change = apply_adjustment(3, -10).unwrap();
        assert_eq!(change.current_stock, -7);
    }

    #[test]
    fn test_zero_delta_still_records() {
        let change = apply_adjustment(12, 0).unwrap();
        assert_eq!(change.old_stock, change.current_stock);
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(apply_adjustment(i32::MAX, 1).is_err());
        assert!(apply_adjustment(i32::MIN, -1).is_err());
    }
}
