//! Domain layer: entities and the tree index
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod codec;
pub mod entities;
pub mod error;
pub mod index;
pub mod render;

pub use codec::RecordSchema;
pub use entities::{ParentRef, Record, RecordId, TreeItem};
pub use error::DomainError;
pub use index::{Ancestors, Preorder, TreeIndex};
pub use render::TreeNodeConvert;
