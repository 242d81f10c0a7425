use serde::{Deserialize, Serialize};

use crate::converter::ConversionError;

/// Columns of the current collection that take part in a join key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalJoin {
    pub fields: Vec<String>,
}

/// Target side of a relation: where it lives and which columns complete the key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForeignJoin {
    pub store: String,
    pub collection: String,
    pub fields: Vec<String>,
}

/// `local.fields[i]` pairs with `foreign.fields[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JoinDescriptor {
    pub local: LocalJoin,
    pub foreign: ForeignJoin,
}

impl JoinDescriptor {
    pub fn new(local_fields: &[&str], store: &str, collection: &str, foreign_fields: &[&str]) -> Self {
        Self {
            local: LocalJoin {
                fields: local_fields.iter().map(|f| f.to_string()).collect(),
            },
            foreign: ForeignJoin {
                store: store.to_string(),
                collection: collection.to_string(),
                fields: foreign_fields.iter().map(|f| f.to_string()).collect(),
            },
        }
    }

    /// Number of column pairs in the key. Fails when both sides disagree or the key is empty.
    pub fn arity(&self, collection: &str) -> Result<usize, ConversionError> {
        let local = self.local.fields.len();
        let foreign = self.foreign.fields.len();
        if local == 0 && foreign == 0 {
            return Err(ConversionError::MalformedNode(format!(
                "join from '{}' to '{}' has no key fields", collection, self.foreign.collection
            )));
        }
        if local != foreign {
            return Err(ConversionError::JoinArityMismatch {
                collection: collection.to_string(),
                local,
                foreign,
            });
        }
        Ok(local)
    }

    pub fn foreign_collection(&self) -> &str {
        &self.foreign.collection
    }
}

/// Relation metadata of a `nested-one` node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NestedOneMeta {
    /// many-to-one: the current row holds the key of exactly one foreign row.
    M2o { join: JoinDescriptor },
}

impl NestedOneMeta {
    pub const KINDS: &'static [&'static str] = &["m2o"];

    pub fn join(&self) -> &JoinDescriptor {
        match self {
            NestedOneMeta::M2o { join } => join,
        }
    }
}

/// Relation metadata of a `nested-many` node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NestedManyMeta {
    /// one-to-many: many foreign rows point back to the current row.
    O2m { join: JoinDescriptor },
}

impl NestedManyMeta {
    pub const KINDS: &'static [&'static str] = &["o2m"];

    pub fn join(&self) -> &JoinDescriptor {
        match self {
            NestedManyMeta::O2m { join } => join,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{ast::{JoinDescriptor, NestedOneMeta}, converter::ConversionError};

    #[test]
    fn test_arity_matches() {
        let join = JoinDescriptor::new(&["a", "b"], "main", "Ext", &["x", "y"]);
        assert_eq!(join.arity("C"), Ok(2));
    }

    #[test]
    fn test_arity_mismatch() {
        let join = JoinDescriptor::new(&["a", "b"], "main", "Ext", &["x"]);
        assert_eq!(
            join.arity("C"),
            Err(ConversionError::JoinArityMismatch { collection: "C".into(), local: 2, foreign: 1 })
        );
    }

    #[test]
    fn test_empty_key_is_malformed() {
        let join = JoinDescriptor::new(&[], "main", "Ext", &[]);
        assert!(matches!(join.arity("C"), Err(ConversionError::MalformedNode(_))));
    }

    #[test]
    fn test_m2o_from_json() {
        let meta: NestedOneMeta = serde_json::from_value(json!({
            "type": "m2o",
            "join": {
                "local": { "fields": ["author"] },
                "foreign": { "store": "pg", "collection": "users", "fields": ["id"] }
            }
        })).unwrap();

        let join = meta.join();
        assert_eq!(join.local.fields, vec!["author"]);
        assert_eq!(join.foreign_collection(), "users");
        assert_eq!(join.foreign.store, "pg");
    }
}
