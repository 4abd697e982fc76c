//! Application layer: services and use cases
//!
//! This layer turns JSON input into domain records and serves queries over them.

pub mod error;
pub mod error_ext;
pub mod loader;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{load_records, parse_records, STDIN_PATH};
pub use services::StoreService;
