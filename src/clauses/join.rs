use serde::Serialize;

use crate::clauses::{ConditionNode, SelectEntry};

/// `JOIN <table> AS <alias> ON <on>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "join")]
pub struct JoinEntry {
    pub table: String,
    pub on: ConditionNode,
    #[serde(rename = "as")]
    pub alias: String,
}

/// Select list and joins produced for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Clauses {
    pub select: Vec<SelectEntry>,
    pub joins: Vec<JoinEntry>,
}
