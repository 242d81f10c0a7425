use std::{fmt, sync::Arc};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    ast::{FieldNode, JoinDescriptor},
    clauses::{ConditionNode, JoinEntry, SelectEntry},
    converter::{AliasMapping, ConversionContext, ConversionError, FieldConverter, JoinResolver},
};

/// Deferred plan for the query of a to-many relation.
///
/// Nothing is computed until [`QueryGenerator::generate`] is called with the key
/// values of one parent row, so callers that never look at the relation pay nothing.
pub trait QueryGenerator: Send + Sync {
    fn generate(&self, key_values: &[Value], ctx: &mut ConversionContext) -> Result<SubQuery, ConversionError>;
}

/// Clauses of a standalone query against the related collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubQueryClauses {
    pub from: String,
    pub select: Vec<SelectEntry>,
    pub joins: Vec<JoinEntry>,
    #[serde(rename = "where")]
    pub where_clause: Option<ConditionNode>,
}

/// Query for the rows of a to-many relation belonging to one parent row.
///
/// The query numbers its own parameter slots from `0`, and `parameters[i]`
/// is the value bound to slot `i`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuery {
    pub store: String,
    pub clauses: SubQueryClauses,
    pub parameters: Vec<Value>,
    pub alias_mapping: AliasMapping,
    pub nested_manys: Vec<NestedManyDescriptor>,
}

/// Captured by value at conversion time; converted only on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedManyQuery {
    pub store: String,
    pub collection: String,
    pub fields: Vec<FieldNode>,
    pub foreign_fields: Vec<String>,
}

impl QueryGenerator for NestedManyQuery {
    fn generate(&self, key_values: &[Value], ctx: &mut ConversionContext) -> Result<SubQuery, ConversionError> {
        if key_values.len() != self.foreign_fields.len() {
            return Err(ConversionError::CorrelationArityMismatch {
                expected: self.foreign_fields.len(),
                got: key_values.len(),
            });
        }

        debug!(collection = %self.collection, keys = key_values.len(), "building nested many query");

        // the sub-query is executed on its own, so its slots start over at 0
        let outer = std::mem::take(&mut ctx.parameters);
        let converted = FieldConverter::convert(&self.collection, &self.fields, ctx);
        let (condition, slots) = JoinResolver::correlation(&self.collection, &self.foreign_fields, &mut ctx.parameters);
        ctx.parameters = outer;
        let converted = converted?;

        let mut parameters = converted.parameters;
        for (slot, value) in slots.into_iter().zip(key_values) {
            if parameters.len() <= slot {
                parameters.resize(slot + 1, Value::Null);
            }
            parameters[slot] = value.clone();
        }

        Ok(SubQuery {
            store: self.store.clone(),
            clauses: SubQueryClauses {
                from: self.collection.clone(),
                select: converted.clauses.select,
                joins: converted.clauses.joins,
                where_clause: Some(condition),
            },
            parameters,
            alias_mapping: converted.alias_mapping,
            nested_manys: converted.nested_manys,
        })
    }
}

/// What the relation-fetch stage needs to load a to-many relation after the primary query.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedManyDescriptor {
    #[serde(skip)]
    pub query_generator: Arc<dyn QueryGenerator>,
    pub local_join_fields: Vec<String>,
    pub foreign_join_fields: Vec<String>,
    /// plain name of the related collection
    pub alias: String,
}

impl NestedManyDescriptor {
    /// Package a `nested-many` node without converting its children.
    ///
    /// `local_join_fields` are plain column names of `collection`. When the relation
    /// sits under a to-one join, the caller locates those values in the parent rows;
    /// they are not added to the select list here.
    pub fn collect(collection: &str, fields: &[FieldNode], join: &JoinDescriptor) -> Result<Self, ConversionError> {
        join.arity(collection)?;

        let query = NestedManyQuery {
            store: join.foreign.store.clone(),
            collection: join.foreign.collection.clone(),
            fields: fields.to_vec(),
            foreign_fields: join.foreign.fields.clone(),
        };

        Ok(Self {
            query_generator: Arc::new(query),
            local_join_fields: join.local.fields.clone(),
            foreign_join_fields: join.foreign.fields.clone(),
            alias: join.foreign.collection.clone(),
        })
    }

    pub fn generate(&self, key_values: &[Value], ctx: &mut ConversionContext) -> Result<SubQuery, ConversionError> {
        self.query_generator.generate(key_values, ctx)
    }
}

impl fmt::Debug for NestedManyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedManyDescriptor")
            .field("local_join_fields", &self.local_join_fields)
            .field("foreign_join_fields", &self.foreign_join_fields)
            .field("alias", &self.alias)
            .finish_non_exhaustive()
    }
}
