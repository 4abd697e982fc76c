//! Domain entities: core data structures

use std::fmt;
use std::hash::Hash;

use serde_json::{Map, Value};

/// Reference from an item to its parent.
///
/// `Root` marks a top-level item; it never collides with an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentRef<Id> {
    Root,
    ChildOf(Id),
}

impl<Id> ParentRef<Id> {
    pub fn is_root(&self) -> bool {
        matches!(self, ParentRef::Root)
    }

    /// Parent id, `None` for top-level items.
    pub fn id(&self) -> Option<&Id> {
        match self {
            ParentRef::Root => None,
            ParentRef::ChildOf(id) => Some(id),
        }
    }
}

impl<Id> From<Option<Id>> for ParentRef<Id> {
    fn from(parent: Option<Id>) -> Self {
        match parent {
            Some(id) => ParentRef::ChildOf(id),
            None => ParentRef::Root,
        }
    }
}

impl<Id: fmt::Display> fmt::Display for ParentRef<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Root => write!(f, "root"),
            ParentRef::ChildOf(id) => write!(f, "{}", id),
        }
    }
}

/// Anything that can be stored in a [`TreeIndex`](crate::domain::TreeIndex).
///
/// The index reads `id` and `parent` only; every other field is payload.
pub trait TreeItem {
    type Id: Eq + Hash + Clone + fmt::Debug;

    fn id(&self) -> &Self::Id;
    fn parent(&self) -> &ParentRef<Self::Id>;
}

/// Identifier type of [`Record`].
pub type RecordId = i64;

/// Record with an integer id, a parent reference and free-form payload fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub parent: ParentRef<RecordId>,
    /// All fields besides id and parent, in input order
    pub payload: Map<String, Value>,
}

impl Record {
    pub fn new(id: RecordId, parent: ParentRef<RecordId>) -> Self {
        Self {
            id,
            parent,
            payload: Map::new(),
        }
    }

    pub fn root(id: RecordId) -> Self {
        Self::new(id, ParentRef::Root)
    }

    pub fn child_of(id: RecordId, parent: RecordId) -> Self {
        Self::new(id, ParentRef::ChildOf(parent))
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl TreeItem for Record {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn parent(&self) -> &ParentRef<RecordId> {
        &self.parent
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if !self.payload.is_empty() {
            write!(f, " {}", Value::Object(self.payload.clone()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_option_when_converting_then_maps_none_to_root() {
        assert_eq!(ParentRef::<i64>::from(None), ParentRef::Root);
        assert_eq!(ParentRef::from(Some(3)), ParentRef::ChildOf(3));
        assert_eq!(ParentRef::ChildOf(3).id(), Some(&3));
        assert!(ParentRef::<i64>::Root.is_root());
    }

    #[test]
    fn given_record_with_payload_when_displaying_then_shows_id_and_fields() {
        let record = Record::child_of(7, 4).with_field("type", json!(null));
        assert_eq!(record.to_string(), r#"7 {"type":null}"#);
        assert_eq!(Record::root(1).to_string(), "1");
    }
}
