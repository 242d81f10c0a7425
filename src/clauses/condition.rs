use serde::Serialize;

/// Column qualified by the table (or table alias) it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "primitive")]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: &str, column: &str) -> Self {
        Self { table: table.to_string(), column: column.to_string() }
    }
}

/// Positional parameter slot; the value lives in the query's `parameters` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "value", rename_all = "camelCase")]
pub struct ParameterRef {
    pub parameter_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompareTo {
    Column(ColumnRef),
    Parameter(ParameterRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperation {
    Eq,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "condition-field", rename_all = "camelCase")]
pub struct FieldCondition {
    pub target: ColumnRef,
    pub operation: ConditionOperation,
    pub compare_to: CompareTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    And,
}

/// Condition tree shared by join `on` clauses and `where` clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ConditionNode {
    #[serde(rename = "condition")]
    Single {
        condition: FieldCondition,
        negate: bool,
    },
    Logical {
        operator: LogicalOperator,
        #[serde(rename = "childNodes")]
        child_nodes: Vec<ConditionNode>,
        negate: bool,
    },
}

impl ConditionNode {
    pub fn equals(target: ColumnRef, compare_to: CompareTo) -> Self {
        Self::Single {
            condition: FieldCondition { target, operation: ConditionOperation::Eq, compare_to },
            negate: false,
        }
    }

    /// Single conditions pass through untouched, anything else becomes an `and` node.
    pub fn all(mut nodes: Vec<ConditionNode>) -> Self {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        Self::Logical { operator: LogicalOperator::And, child_nodes: nodes, negate: false }
    }

    /// Every leaf condition, left to right.
    pub fn leaves(&self) -> Vec<&FieldCondition> {
        match self {
            ConditionNode::Single { condition, .. } => vec![condition],
            ConditionNode::Logical { child_nodes, .. } => child_nodes.iter().flat_map(|c| c.leaves()).collect(),
        }
    }

    pub fn is_negated(&self) -> bool {
        match self {
            ConditionNode::Single { negate, .. } | ConditionNode::Logical { negate, .. } => *negate,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::clauses::{ColumnRef, CompareTo, ConditionNode, ParameterRef};

    #[test]
    fn test_single_condition_wire_shape() {
        let node = ConditionNode::equals(
            ColumnRef::new("articles", "author"),
            CompareTo::Column(ColumnRef::new("users_1", "id")),
        );

        assert_eq!(serde_json::to_value(&node).unwrap(), json!({
            "type": "condition",
            "condition": {
                "type": "condition-field",
                "target": { "type": "primitive", "table": "articles", "column": "author" },
                "operation": "eq",
                "compareTo": { "type": "primitive", "table": "users_1", "column": "id" }
            },
            "negate": false
        }));
    }

    #[test]
    fn test_parameter_wire_shape() {
        let node = ConditionNode::equals(
            ColumnRef::new("comments", "article"),
            CompareTo::Parameter(ParameterRef { parameter_index: 0 }),
        );

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["condition"]["compareTo"], json!({ "type": "value", "parameterIndex": 0 }));
    }

    #[test]
    fn test_and_of_one_is_the_condition_itself() {
        let single = ConditionNode::equals(
            ColumnRef::new("a", "x"),
            CompareTo::Column(ColumnRef::new("b", "y")),
        );
        assert_eq!(ConditionNode::all(vec![single.clone()]), single);
    }

    #[test]
    fn test_and_of_many_is_logical() {
        let first = ConditionNode::equals(ColumnRef::new("a", "x"), CompareTo::Column(ColumnRef::new("b", "x")));
        let second = ConditionNode::equals(ColumnRef::new("a", "y"), CompareTo::Column(ColumnRef::new("b", "y")));
        let node = ConditionNode::all(vec![first, second]);

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "logical");
        assert_eq!(value["operator"], "and");
        assert_eq!(value["childNodes"].as_array().unwrap().len(), 2);
        assert_eq!(node.leaves().len(), 2);
        assert!(!node.is_negated());
    }
}
