//! Business logic services for inventory and sales

pub mod catalog;
pub mod inventory;
pub mod sales;

pub use catalog::CatalogService;
pub use inventory::InventoryService;
pub use sales::SalesService;
