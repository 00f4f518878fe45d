//! HTTP handlers

pub mod catalog;
pub mod health;
pub mod inventory;
pub mod sales;

pub use catalog::*;
pub use health::*;
pub use inventory::*;
pub use sales::*;
