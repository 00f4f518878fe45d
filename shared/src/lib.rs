//! Shared types and domain logic for the inventory and sales backend
//!
//! Everything in this crate is pure: enumerations, pagination, date parsing,
//! revenue windows, stock arithmetic and sale-batch planning. The backend
//! crate owns all I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
