use serde::Serialize;

use crate::ast::FnDescriptor;

/// One output column of the select list.
///
/// `table` is the source table as seen by the query: the collection itself, or
/// the generated alias of the join that brought it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SelectEntry {
    Primitive {
        table: String,
        column: String,
        #[serde(rename = "as")]
        alias: String,
    },
    Fn {
        #[serde(rename = "fn")]
        function: FnDescriptor,
        table: String,
        column: String,
        #[serde(rename = "as")]
        alias: String,
    },
}

impl SelectEntry {
    pub fn primitive(table: &str, column: &str, alias: String) -> Self {
        Self::Primitive { table: table.to_string(), column: column.to_string(), alias }
    }

    pub fn function(function: FnDescriptor, table: &str, column: &str, alias: String) -> Self {
        Self::Fn { function, table: table.to_string(), column: column.to_string(), alias }
    }

    pub fn alias(&self) -> &str {
        match self {
            SelectEntry::Primitive { alias, .. } | SelectEntry::Fn { alias, .. } => alias,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            SelectEntry::Primitive { table, .. } | SelectEntry::Fn { table, .. } => table,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            SelectEntry::Primitive { column, .. } | SelectEntry::Fn { column, .. } => column,
        }
    }
}
