use tracing::{debug, trace};

use crate::{
    ast::{FieldNode, JoinDescriptor},
    clauses::SelectEntry,
    config::ConverterConfig,
    converter::{ConversionContext, ConversionError, FieldConversionResult, JoinResolver, NestedManyDescriptor},
    generators::ParameterIndexGenerator,
};

/// Turns a list of field nodes into select entries, joins, an alias mapping
/// and deferred to-many plans.
pub struct FieldConverter;

impl FieldConverter {
    /// Convert `nodes`, all relative to `collection`.
    ///
    /// `collection` is the name the query sees: the table itself at the root, the
    /// generated join alias when called for the children of a to-one relation.
    pub fn convert(collection: &str, nodes: &[FieldNode], ctx: &mut ConversionContext) -> Result<FieldConversionResult, ConversionError> {
        if collection.is_empty() {
            return Err(ConversionError::MalformedNode("collection name must not be empty".into()));
        }

        debug!(collection, nodes = nodes.len(), depth = ctx.depth, "converting field nodes");

        let mut result = FieldConversionResult::new();
        for node in nodes {
            trace!(collection, kind = node.kind(), "field node");
            match node {
                FieldNode::Primitive { field } => {
                    let alias = ctx.unique_alias(field)?;
                    result.push_select(SelectEntry::primitive(collection, field, alias), vec![field.clone()]);
                }
                FieldNode::Fn { function, field } => {
                    let alias = ctx.unique_alias(&function.alias_seed(field))?;
                    result.push_select(SelectEntry::function(*function, collection, field, alias), vec![field.clone()]);
                }
                FieldNode::NestedOne { fields, meta } => {
                    Self::convert_nested_one(collection, fields, meta.join(), ctx, &mut result)?;
                }
                FieldNode::NestedMany { fields, meta } => {
                    let descriptor = NestedManyDescriptor::collect(collection, fields, meta.join())?;
                    trace!(collection, related = %descriptor.alias, "deferred nested many");
                    result.nested_manys.push(descriptor);
                }
            }
        }

        Ok(result)
    }

    /// Join the foreign collection under a fresh alias and pull its fields into `result`.
    ///
    /// The join entry is pushed before the relation's own joins, so every join
    /// only refers to aliases already introduced.
    fn convert_nested_one(
        collection: &str,
        fields: &[FieldNode],
        join: &JoinDescriptor,
        ctx: &mut ConversionContext,
        result: &mut FieldConversionResult,
    ) -> Result<(), ConversionError> {
        join.arity(collection)?;

        let foreign = join.foreign_collection();
        let foreign_alias = ctx.unique_alias(foreign)?;
        result.clauses.joins.push(JoinResolver::join_entry(collection, join, &foreign_alias)?);

        ctx.descend(foreign)?;
        let nested = Self::convert(&foreign_alias, fields, ctx);
        ctx.ascend();

        result.merge_nested(nested?, foreign);
        Ok(())
    }
}

/// Convert with default settings, sharing `parameters` with the caller.
///
/// The cursor of `parameters` is advanced in place, so sibling passes of the
/// same query (conditions, sorting, ...) keep drawing unique slots.
pub fn convert_field_nodes(
    collection: &str,
    nodes: &[FieldNode],
    parameters: &mut ParameterIndexGenerator,
) -> Result<FieldConversionResult, ConversionError> {
    convert_field_nodes_with(collection, nodes, parameters, ConverterConfig::default())
}

pub fn convert_field_nodes_with(
    collection: &str,
    nodes: &[FieldNode],
    parameters: &mut ParameterIndexGenerator,
    config: ConverterConfig,
) -> Result<FieldConversionResult, ConversionError> {
    let mut ctx = ConversionContext::with_parameters(config, std::mem::take(parameters));
    let result = FieldConverter::convert(collection, nodes, &mut ctx);
    *parameters = ctx.into_parameters();
    result
}
