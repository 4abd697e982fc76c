//! Record store service
//!
//! Owns a [`TreeIndex`] over records loaded from JSON and answers queries
//! in record or JSON form.

use std::path::Path;

use serde_json::Value;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::loader::{load_records, parse_records};
use crate::application::ApplicationResult;
use crate::domain::{Record, RecordId, RecordSchema, TreeIndex, TreeNodeConvert};

/// Query facade over an indexed record set.
#[derive(Debug)]
pub struct StoreService {
    index: TreeIndex<Record>,
    schema: RecordSchema,
}

impl StoreService {
    pub fn new(records: Vec<Record>, schema: RecordSchema) -> Self {
        Self {
            index: TreeIndex::new(records),
            schema,
        }
    }

    /// Load and index a record file (`-` for stdin).
    #[instrument(level = "debug")]
    pub fn open(path: &Path, schema: RecordSchema) -> ApplicationResult<Self> {
        let records = load_records(path, &schema)?;
        debug!("open: indexed {} records from {}", records.len(), path.display());
        Ok(Self::new(records, schema))
    }

    pub fn from_json_str(text: &str, schema: RecordSchema) -> ApplicationResult<Self> {
        let records = parse_records(text, &schema)?;
        Ok(Self::new(records, schema))
    }

    pub fn index(&self) -> &TreeIndex<Record> {
        &self.index
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn all(&self) -> &[Record] {
        self.index.get_all()
    }

    pub fn item(&self, id: RecordId) -> Option<&Record> {
        self.index.get_item(&id)
    }

    pub fn children(&self, id: RecordId) -> Vec<&Record> {
        self.index.get_children(&id)
    }

    pub fn parents(&self, id: RecordId) -> Vec<&Record> {
        self.index.get_all_parents(&id)
    }

    pub fn roots(&self) -> Vec<&Record> {
        self.index.get_roots()
    }

    pub fn tree(&self) -> Tree<String> {
        self.index.to_tree_string()
    }

    /// Encode records as a JSON array using this store's schema.
    pub fn to_json<'a>(&self, records: impl IntoIterator<Item = &'a Record>) -> Value {
        Value::Array(
            records
                .into_iter()
                .map(|record| record.to_json(&self.schema))
                .collect(),
        )
    }
}
