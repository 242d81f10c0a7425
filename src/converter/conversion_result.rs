use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::{clauses::{Clauses, SelectEntry}, converter::NestedManyDescriptor};

/// Output alias -> path of the field that produced it, e.g. `["author", "name"]`.
pub type AliasMapping = IndexMap<String, Vec<String>>;

/// Everything the field-resolution stage produces for one collection.
///
/// A to-one join always precedes the joins of its own children in `clauses.joins`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConversionResult {
    pub clauses: Clauses,
    pub parameters: Vec<Value>,
    pub alias_mapping: AliasMapping,
    pub nested_manys: Vec<NestedManyDescriptor>,
}

impl FieldConversionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a select entry and record where its value belongs.
    pub fn push_select(&mut self, entry: SelectEntry, path: Vec<String>) {
        self.alias_mapping.insert(entry.alias().to_string(), path);
        self.clauses.select.push(entry);
    }

    /// Fold in the result of a to-one relation converted under its own alias.
    ///
    /// Select entries, joins, parameters and nested manys are appended in order.
    /// Every alias path gets `foreign_collection` (the plain name) prepended.
    pub fn merge_nested(&mut self, child: FieldConversionResult, foreign_collection: &str) {
        let FieldConversionResult { clauses, parameters, alias_mapping, nested_manys } = child;

        self.clauses.select.extend(clauses.select);
        self.clauses.joins.extend(clauses.joins);
        self.parameters.extend(parameters);

        for (alias, path) in alias_mapping {
            let mut prefixed = Vec::with_capacity(path.len() + 1);
            prefixed.push(foreign_collection.to_string());
            prefixed.extend(path);
            self.alias_mapping.insert(alias, prefixed);
        }

        self.nested_manys.extend(nested_manys);
    }

    pub fn path_of(&self, alias: &str) -> Option<&[String]> {
        self.alias_mapping.get(alias).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.select.is_empty() && self.clauses.joins.is_empty() && self.nested_manys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::{clauses::SelectEntry, converter::FieldConversionResult};

    #[test]
    fn test_push_select_records_path() {
        let mut result = FieldConversionResult::new();
        result.push_select(SelectEntry::primitive("articles", "title", "title_1".into()), vec!["title".into()]);

        assert_eq!(result.clauses.select.len(), 1);
        assert_eq!(result.path_of("title_1"), Some(&["title".to_string()][..]));
        assert_eq!(result.path_of("missing"), None);
    }

    #[test]
    fn test_merge_nested_prefixes_paths() {
        let mut parent = FieldConversionResult::new();
        parent.push_select(SelectEntry::primitive("articles", "title", "title_1".into()), vec!["title".into()]);

        let mut child = FieldConversionResult::new();
        child.push_select(SelectEntry::primitive("users_2", "name", "name_3".into()), vec!["name".into()]);
        child.push_select(
            SelectEntry::primitive("roles_4", "label", "label_5".into()),
            vec!["roles".into(), "label".into()],
        );

        parent.merge_nested(child, "users");

        let aliases: Vec<_> = parent.clauses.select.iter().map(|s| s.alias()).collect();
        assert_eq!(aliases, vec!["title_1", "name_3", "label_5"]);
        assert_eq!(parent.path_of("name_3").unwrap(), ["users", "name"]);
        assert_eq!(parent.path_of("label_5").unwrap(), ["users", "roles", "label"]);
        assert_eq!(parent.alias_mapping.len(), 3);
    }

    #[test]
    fn test_empty() {
        assert!(FieldConversionResult::new().is_empty());
    }
}
