//! JSON form of [`Record`].
//!
//! Records are plain objects: `{"id": 7, "parent": 4, ...}`. Top-level records
//! carry the root sentinel string as parent, `"root"` unless configured
//! otherwise.

use serde_json::{Map, Value};

use crate::domain::entities::{ParentRef, Record, RecordId};
use crate::domain::error::DomainError;

pub const DEFAULT_ID_FIELD: &str = "id";
pub const DEFAULT_PARENT_FIELD: &str = "parent";
pub const DEFAULT_ROOT_SENTINEL: &str = "root";

/// Field names and root sentinel used to read and write records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub id_field: String,
    pub parent_field: String,
    pub root_sentinel: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.into(),
            parent_field: DEFAULT_PARENT_FIELD.into(),
            root_sentinel: DEFAULT_ROOT_SENTINEL.into(),
        }
    }
}

impl Record {
    /// Decode a record. `position` only feeds error messages.
    pub fn from_json(value: Value, schema: &RecordSchema, position: usize) -> Result<Self, DomainError> {
        let Value::Object(object) = value else {
            return Err(DomainError::NotAnObject { position });
        };

        let mut id = None;
        let mut parent = None;
        let mut payload = Map::new();
        for (key, value) in object {
            if key == schema.id_field {
                id = Some(decode_id(&value, position)?);
            } else if key == schema.parent_field {
                parent = Some(decode_parent(&value, schema, position)?);
            } else {
                payload.insert(key, value);
            }
        }

        let id = id.ok_or_else(|| DomainError::MissingField {
            position,
            field: schema.id_field.clone(),
        })?;
        let parent = parent.ok_or_else(|| DomainError::MissingField {
            position,
            field: schema.parent_field.clone(),
        })?;

        Ok(Self { id, parent, payload })
    }

    /// Encode as an object with id and parent first, then the payload.
    pub fn to_json(&self, schema: &RecordSchema) -> Value {
        let mut object = Map::with_capacity(self.payload.len() + 2);
        object.insert(schema.id_field.clone(), Value::from(self.id));
        let parent = match &self.parent {
            ParentRef::Root => Value::from(schema.root_sentinel.as_str()),
            ParentRef::ChildOf(id) => Value::from(*id),
        };
        object.insert(schema.parent_field.clone(), parent);
        for (key, value) in &self.payload {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

/// Integer value of a JSON number; integral floats such as `7.0` count too.
fn as_record_id(value: &Value) -> Option<RecordId> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as RecordId)
    })
}

fn decode_id(value: &Value, position: usize) -> Result<RecordId, DomainError> {
    as_record_id(value).ok_or_else(|| DomainError::InvalidId {
        position,
        value: value.to_string(),
    })
}

fn decode_parent(
    value: &Value,
    schema: &RecordSchema,
    position: usize,
) -> Result<ParentRef<RecordId>, DomainError> {
    match value {
        Value::String(s) if *s == schema.root_sentinel => Ok(ParentRef::Root),
        Value::Number(_) => as_record_id(value)
            .map(ParentRef::ChildOf)
            .ok_or_else(|| invalid_parent(value, schema, position)),
        _ => Err(invalid_parent(value, schema, position)),
    }
}

fn invalid_parent(value: &Value, schema: &RecordSchema, position: usize) -> DomainError {
    DomainError::InvalidParent {
        position,
        value: value.to_string(),
        sentinel: schema.root_sentinel.clone(),
    }
}
