use crate::{
    ast::JoinDescriptor,
    clauses::{ColumnRef, CompareTo, ConditionNode, JoinEntry, ParameterRef},
    converter::ConversionError,
    generators::ParameterIndexGenerator,
};

pub struct JoinResolver;

impl JoinResolver {
    /// `local_table.local[i] = foreign_table.foreign[i]` for every `i`, combined with `and`.
    ///
    /// Arity one yields a bare condition node; callers treat both shapes as a `ConditionNode`.
    pub fn equality(
        local_table: &str,
        local_fields: &[String],
        foreign_table: &str,
        foreign_fields: &[String],
    ) -> Result<ConditionNode, ConversionError> {
        if local_fields.len() != foreign_fields.len() {
            return Err(ConversionError::JoinArityMismatch {
                collection: local_table.to_string(),
                local: local_fields.len(),
                foreign: foreign_fields.len(),
            });
        }

        let conditions = local_fields.iter()
            .zip(foreign_fields)
            .map(|(local, foreign)| ConditionNode::equals(
                ColumnRef::new(local_table, local),
                CompareTo::Column(ColumnRef::new(foreign_table, foreign)),
            ))
            .collect();

        Ok(ConditionNode::all(conditions))
    }

    /// Join entry for a to-one relation. The local side stays on `collection`
    /// as given, the foreign side is addressed through `foreign_alias`.
    pub fn join_entry(collection: &str, join: &JoinDescriptor, foreign_alias: &str) -> Result<JoinEntry, ConversionError> {
        join.arity(collection)?;
        let on = Self::equality(collection, &join.local.fields, foreign_alias, &join.foreign.fields)?;

        Ok(JoinEntry {
            table: join.foreign.collection.clone(),
            on,
            alias: foreign_alias.to_string(),
        })
    }

    /// `table.fields[i] = $p_i` where each `p_i` is a fresh parameter slot.
    ///
    /// Returns the condition and the slots in field order.
    pub fn correlation(
        table: &str,
        fields: &[String],
        parameters: &mut ParameterIndexGenerator,
    ) -> (ConditionNode, Vec<usize>) {
        let mut indexes = Vec::with_capacity(fields.len());
        let conditions = fields.iter()
            .map(|field| {
                let parameter_index = parameters.next_index();
                indexes.push(parameter_index);
                ConditionNode::equals(
                    ColumnRef::new(table, field),
                    CompareTo::Parameter(ParameterRef { parameter_index }),
                )
            })
            .collect();

        (ConditionNode::all(conditions), indexes)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::JoinDescriptor,
        clauses::{ColumnRef, CompareTo, ConditionNode, LogicalOperator, ParameterRef},
        converter::{ConversionError, JoinResolver},
        generators::ParameterIndexGenerator,
    };

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_pair() {
        let on = JoinResolver::equality("articles", &strings(&["author"]), "users_1", &strings(&["id"])).unwrap();

        assert_eq!(on, ConditionNode::equals(
            ColumnRef::new("articles", "author"),
            CompareTo::Column(ColumnRef::new("users_1", "id")),
        ));
    }

    #[test]
    fn test_composite_key() {
        let on = JoinResolver::equality(
            "lines",
            &strings(&["order_id", "order_year"]),
            "orders_4",
            &strings(&["id", "year"]),
        ).unwrap();

        match &on {
            ConditionNode::Logical { operator, child_nodes, negate } => {
                assert_eq!(*operator, LogicalOperator::And);
                assert!(!negate);
                assert_eq!(child_nodes[0], ConditionNode::equals(
                    ColumnRef::new("lines", "order_id"),
                    CompareTo::Column(ColumnRef::new("orders_4", "id")),
                ));
                assert_eq!(child_nodes[1], ConditionNode::equals(
                    ColumnRef::new("lines", "order_year"),
                    CompareTo::Column(ColumnRef::new("orders_4", "year")),
                ));
            }
            other => panic!("Expected a logical node, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_arity() {
        let result = JoinResolver::equality("lines", &strings(&["a", "b"]), "orders_4", &strings(&["id"]));
        assert_eq!(result, Err(ConversionError::JoinArityMismatch {
            collection: "lines".into(),
            local: 2,
            foreign: 1,
        }));
    }

    #[test]
    fn test_join_entry() {
        let join = JoinDescriptor::new(&["author"], "pg", "users", &["id"]);
        let entry = JoinResolver::join_entry("articles", &join, "users_7").unwrap();

        assert_eq!(entry.table, "users");
        assert_eq!(entry.alias, "users_7");
        let leaves = entry.on.leaves();
        assert_eq!(leaves[0].target, ColumnRef::new("articles", "author"));
        assert_eq!(leaves[0].compare_to, CompareTo::Column(ColumnRef::new("users_7", "id")));
    }

    #[test]
    fn test_correlation_draws_parameter_slots() {
        let mut parameters = ParameterIndexGenerator::new();
        parameters.next_index();

        let (condition, indexes) = JoinResolver::correlation("comments", &strings(&["article", "lang"]), &mut parameters);

        assert_eq!(indexes, vec![1, 2]);
        let leaves = condition.leaves();
        assert_eq!(leaves[0].target, ColumnRef::new("comments", "article"));
        assert_eq!(leaves[0].compare_to, CompareTo::Parameter(ParameterRef { parameter_index: 1 }));
        assert_eq!(leaves[1].compare_to, CompareTo::Parameter(ParameterRef { parameter_index: 2 }));
    }
}
