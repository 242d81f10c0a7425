use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ast::{FnDescriptor, JoinDescriptor, NestedManyMeta, NestedOneMeta}, config::DEFAULT_MAX_DEPTH, converter::ConversionError};

/// One item of the requested output shape.
///
/// The enum is closed: a new kind of node has to be handled everywhere a
/// `match` over it exists. Input coming from JSON is checked against
/// [`FieldNode::KINDS`] first, so unknown tags surface as
/// [`ConversionError::UnsupportedNodeKind`] instead of a generic serde error.
/// Relation nesting in parsed input is bounded by `DEFAULT_MAX_DEPTH` unless
/// another limit is passed to [`FieldNode::parse_list_with_depth`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldNode {
    /// Plain column of the current collection.
    Primitive { field: String },
    /// Computed column over `field`.
    Fn {
        #[serde(rename = "fn")]
        function: FnDescriptor,
        field: String,
    },
    /// To-one relation, collapsed into a join.
    NestedOne { fields: Vec<FieldNode>, meta: NestedOneMeta },
    /// To-many relation, fetched by a separate correlated query.
    NestedMany { fields: Vec<FieldNode>, meta: NestedManyMeta },
}

impl FieldNode {
    pub const KINDS: &'static [&'static str] = &["primitive", "fn", "nested-one", "nested-many"];

    pub fn primitive(field: &str) -> Self {
        Self::Primitive { field: field.to_string() }
    }

    pub fn function(function: FnDescriptor, field: &str) -> Self {
        Self::Fn { function, field: field.to_string() }
    }

    pub fn nested_one(fields: Vec<FieldNode>, join: JoinDescriptor) -> Self {
        Self::NestedOne { fields, meta: NestedOneMeta::M2o { join } }
    }

    pub fn nested_many(fields: Vec<FieldNode>, join: JoinDescriptor) -> Self {
        Self::NestedMany { fields, meta: NestedManyMeta::O2m { join } }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldNode::Primitive { .. } => "primitive",
            FieldNode::Fn { .. } => "fn",
            FieldNode::NestedOne { .. } => "nested-one",
            FieldNode::NestedMany { .. } => "nested-many",
        }
    }

    /// Parse an ordered list of field nodes as produced by the query grammar.
    pub fn parse_list(value: &Value) -> Result<Vec<FieldNode>, ConversionError> {
        Self::parse_list_with_depth(value, DEFAULT_MAX_DEPTH)
    }

    /// Like [`FieldNode::parse_list`], rejecting relations nested deeper than `max_depth`.
    pub fn parse_list_with_depth(value: &Value, max_depth: usize) -> Result<Vec<FieldNode>, ConversionError> {
        let items = value.as_array()
            .ok_or_else(|| ConversionError::MalformedNode("field nodes must be an array".into()))?;

        for item in items {
            Self::check_kinds(item, 0, max_depth)?;
        }

        serde_json::from_value(value.clone())
            .map_err(|err| ConversionError::MalformedNode(err.to_string()))
    }

    /// `depth` counts the relation nodes above `value`.
    fn check_kinds(value: &Value, depth: usize, max_depth: usize) -> Result<(), ConversionError> {
        let tag = value.get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ConversionError::MalformedNode(format!("field node without a type tag: {}", value)))?;

        if !Self::KINDS.contains(&tag) {
            return Err(ConversionError::UnsupportedNodeKind(tag.to_string()));
        }

        let relation_kinds = match tag {
            "nested-one" => NestedOneMeta::KINDS,
            "nested-many" => NestedManyMeta::KINDS,
            _ => return Ok(()),
        };

        if depth >= max_depth {
            return Err(ConversionError::DepthLimitExceeded {
                collection: Self::foreign_collection_of(value),
                limit: max_depth,
            });
        }

        if let Some(relation) = value.get("meta").and_then(|meta| meta.get("type")).and_then(Value::as_str) {
            if !relation_kinds.contains(&relation) {
                return Err(ConversionError::UnsupportedRelationKind {
                    node: tag.to_string(),
                    relation: relation.to_string(),
                });
            }
        }

        if let Some(children) = value.get("fields").and_then(Value::as_array) {
            for child in children {
                Self::check_kinds(child, depth + 1, max_depth)?;
            }
        }

        Ok(())
    }

    fn foreign_collection_of(value: &Value) -> String {
        value.pointer("/meta/join/foreign/collection")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

impl TryFrom<Value> for FieldNode {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::check_kinds(&value, 0, DEFAULT_MAX_DEPTH)?;
        serde_json::from_value(value).map_err(|err| ConversionError::MalformedNode(err.to_string()))
    }
}
