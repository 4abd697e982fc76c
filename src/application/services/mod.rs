//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod store;

pub use store::StoreService;
