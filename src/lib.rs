//! In-memory index over parent-referencing records.
//!
//! [`domain::TreeIndex`] is built once from a sequence of items and answers
//! lookups by id, by parent, and ancestor-chain queries. The remaining layers
//! load JSON records, read configuration and expose the queries as a CLI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{ParentRef, Record, TreeIndex, TreeItem};
