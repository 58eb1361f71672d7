//! Nested record tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::schema::{HeaderPath, PATH_SEPARATOR};

use super::value::TypedValue;

/// A node of a nested record: a scalar leaf or a container of children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordNode {
    Value(TypedValue),
    Object(IndexMap<String, RecordNode>),
}

impl RecordNode {
    pub fn as_value(&self) -> Option<&TypedValue> {
        match self {
            RecordNode::Value(v) => Some(v),
            RecordNode::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, RecordNode>> {
        match self {
            RecordNode::Object(map) => Some(map),
            RecordNode::Value(_) => None,
        }
    }

    /// Number of container levels below this node, counting this one.
    pub fn depth(&self) -> usize {
        match self {
            RecordNode::Value(_) => 0,
            RecordNode::Object(map) => 1 + map.values().map(RecordNode::depth).max().unwrap_or(0),
        }
    }

    /// Turn this node into a container, discarding a scalar if present.
    fn ensure_object(&mut self) -> &mut IndexMap<String, RecordNode> {
        if let RecordNode::Value(_) = self {
            *self = RecordNode::Object(IndexMap::new());
        }
        match self {
            RecordNode::Object(map) => map,
            RecordNode::Value(_) => unreachable!("scalar replaced by container above"),
        }
    }
}

/// The structured record built from one data row.
///
/// Top-level keys keep the order in which their columns first appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedRecord {
    fields: IndexMap<String, RecordNode>,
}

impl NestedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` at `path`, creating containers along the way.
    ///
    /// A scalar found where a container is needed is replaced, and an
    /// existing leaf is overwritten: the last write wins.
    pub fn insert_path(&mut self, path: &HeaderPath, value: TypedValue) {
        let (parents, leaf) = path.split_leaf();
        let mut current = &mut self.fields;

        for segment in parents {
            current = current
                .entry(segment.clone())
                .or_insert_with(|| RecordNode::Object(IndexMap::new()))
                .ensure_object();
        }

        current.insert(leaf.to_string(), RecordNode::Value(value));
    }

    /// Look up a top-level property.
    pub fn get(&self, key: &str) -> Option<&RecordNode> {
        self.fields.get(key)
    }

    /// Look up a node by dot-notation path, e.g. `name.firstName`.
    pub fn get_path(&self, dotted: &str) -> Option<&RecordNode> {
        let mut segments = dotted.split(PATH_SEPARATOR);
        let mut node = self.fields.get(segments.next()?)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        Some(node)
    }

    /// Look up a scalar by dot-notation path.
    pub fn get_value(&self, dotted: &str) -> Option<&TypedValue> {
        self.get_path(dotted).and_then(RecordNode::as_value)
    }

    /// Remove a top-level property, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<RecordNode> {
        self.fields.shift_remove(key)
    }

    pub fn fields(&self) -> &IndexMap<String, RecordNode> {
        &self.fields
    }

    pub fn into_fields(self) -> IndexMap<String, RecordNode> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as a JSON object.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<IndexMap<String, RecordNode>> for NestedRecord {
    fn from(fields: IndexMap<String, RecordNode>) -> Self {
        Self { fields }
    }
}
