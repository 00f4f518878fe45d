//! Domain models for inventory and sales

mod catalog;
mod inventory;
mod revenue;
mod sales;

pub use catalog::*;
pub use inventory::*;
pub use revenue::*;
pub use sales::*;
