use indexmap::IndexMap;

use crate::error::{JsonError, JsonOutcome};
use crate::num::JsonNumber;
use crate::path::NodePath;

/// Object members in source order. Insertion order is irrelevant for
/// semantics but preserved so rendering is deterministic.
pub type FieldMap = IndexMap<String, JsonNode>;

/// One in-memory JSON value, annotated with its location in the tree.
///
/// A tree is fully materialized before any codec decoding starts; there are
/// no partial or streaming nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonNode {
    Null {
        path: NodePath,
    },
    Boolean {
        value: bool,
        path: NodePath,
    },
    Number {
        value: JsonNumber,
        path: NodePath,
    },
    String {
        text: String,
        path: NodePath,
    },
    Array {
        items: Vec<JsonNode>,
        path: NodePath,
    },
    Object {
        fields: FieldMap,
        path: NodePath,
    },
}

impl JsonNode {
    pub fn path(&self) -> &NodePath {
        match self {
            JsonNode::Null { path }
            | JsonNode::Boolean { path, .. }
            | JsonNode::Number { path, .. }
            | JsonNode::String { path, .. }
            | JsonNode::Array { path, .. }
            | JsonNode::Object { path, .. } => path,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonNode::Null { .. } => "Null",
            JsonNode::Boolean { .. } => "Boolean",
            JsonNode::Number { .. } => "Number",
            JsonNode::String { .. } => "String",
            JsonNode::Array { .. } => "Array",
            JsonNode::Object { .. } => "Object",
        }
    }

    pub fn expect_boolean(&self) -> JsonOutcome<bool> {
        match self {
            JsonNode::Boolean { value, .. } => Ok(*value),
            other => Err(wrong_type(other, "Boolean")),
        }
    }

    pub fn expect_number(&self) -> JsonOutcome<&JsonNumber> {
        match self {
            JsonNode::Number { value, .. } => Ok(value),
            other => Err(wrong_type(other, "Number")),
        }
    }

    pub fn expect_string(&self) -> JsonOutcome<&str> {
        match self {
            JsonNode::String { text, .. } => Ok(text),
            other => Err(wrong_type(other, "String")),
        }
    }

    pub fn expect_array(&self) -> JsonOutcome<&[JsonNode]> {
        match self {
            JsonNode::Array { items, .. } => Ok(items),
            other => Err(wrong_type(other, "Array")),
        }
    }

    pub fn expect_object(&self) -> JsonOutcome<(&FieldMap, &NodePath)> {
        match self {
            JsonNode::Object { fields, path } => Ok((fields, path)),
            other => Err(wrong_type(other, "Object")),
        }
    }
}

fn wrong_type(node: &JsonNode, expected: &str) -> JsonError {
    JsonError::wrong_type(node.path(), expected, node.kind_name())
}
