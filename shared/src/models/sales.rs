//! Sale batch planning
//!
//! A batch of sale lines is checked against the locked stock levels before
//! anything is written. Planning is all-or-nothing: either every line gets a
//! decrement, or the first offending product is reported and nothing is
//! planned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::StockChange;

/// Current stock of one product's inventory row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub inventory_id: Uuid,
    pub product_id: Uuid,
    pub stock_quantity: i32,
}

/// One requested line of a sale batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDemand {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Decrement to apply for one sale line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedDecrement {
    pub line_index: usize,
    pub inventory_id: Uuid,
    pub product_id: Uuid,
    pub change: StockChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SalePlanError {
    #[error("Insufficient inventory found for product: {product_id}")]
    InsufficientStock {
        product_id: Uuid,
        requested: i32,
        available: Option<i32>,
    },

    #[error("Sale quantity must be positive for product {product_id}, got {quantity}")]
    InvalidQuantity { product_id: Uuid, quantity: i32 },
}

impl SalePlanError {
    pub fn product_id(&self) -> Uuid {
        match self {
            SalePlanError::InsufficientStock { product_id, .. }
            | SalePlanError::InvalidQuantity { product_id, .. } => *product_id,
        }
    }
}

/// Plan the stock decrements for a batch of sale lines.
///
/// Lines naming the same product draw from the running balance, so a batch
/// can never sell more than was on hand when the batch started.
pub fn plan_sale_batch(
    levels: &[StockLevel],
    lines: &[SaleDemand],
) -> Result<Vec<PlannedDecrement>, SalePlanError> {
    let mut running: HashMap<Uuid, (Uuid, i32)> = levels
        .iter()
        .map(|level| (level.product_id, (level.inventory_id, level.stock_quantity)))
        .collect();

    let mut plan = Vec::with_capacity(lines.len());

    for (line_index, line) in lines.iter().enumerate() {
        if line.quantity <= 0 {
            return Err(SalePlanError::InvalidQuantity {
                product_id: line.product_id,
                quantity: line.quantity,
            });
        }

        let Some((inventory_id, available)) = running.get_mut(&line.product_id) else {
            return Err(SalePlanError::InsufficientStock {
                product_id: line.product_id,
                requested: line.quantity,
                available: None,
            });
        };

        if line.quantity > *available {
            return Err(SalePlanError::InsufficientStock {
                product_id: line.product_id,
                requested: line.quantity,
                available: Some(*available),
            });
        }

        let change = StockChange {
            old_stock: *available,
            current_stock: *available - line.quantity,
        };
        *available = change.current_stock;

        plan.push(PlannedDecrement {
            line_index,
            inventory_id: *inventory_id,
            product_id: line.product_id,
            change,
        });
    }

    Ok(plan)
}
