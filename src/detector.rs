use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::parser::{NodeId, StyleTree};

/// A property name repeated inside one group body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateProp {
    pub group: String,
    pub property: String,
    /// Line of the repeated occurrence.
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    /// Every repeat of a group name beyond its first occurrence, in order.
    pub top_level_duplicates: Vec<String>,
    pub duplicate_props: Vec<DuplicateProp>,
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        self.top_level_duplicates.is_empty() && self.duplicate_props.is_empty()
    }
}

/// Report duplicate group names and, per group body, duplicate property names.
///
/// Each group occurrence is checked on its own, so a name repeated across
/// different groups is not a finding.
pub fn find_duplicates(tree: &StyleTree) -> DuplicateReport {
    let groups = tree.groups();
    debug!(groups = groups.len(), "extracted groups");

    let mut report = DuplicateReport::default();
    let mut seen_groups = HashSet::new();

    for group in &groups {
        if !seen_groups.insert(group.name) {
            debug!(group = group.name, line = group.line, "repeated group");
            report.top_level_duplicates.push(group.name.to_string());
        }
    }

    // One seen-set per group body
    let mut seen_props: HashMap<NodeId, HashSet<&str>> = HashMap::new();
    for (group, key) in tree.properties() {
        let Some(property) = tree.key_name(key) else {
            continue;
        };
        if !seen_props.entry(group.body).or_default().insert(property) {
            report.duplicate_props.push(DuplicateProp {
                group: group.name.to_string(),
                property: property.to_string(),
                line: tree.node(key).line,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{build_tree, Lexer};

    fn report(src: &str) -> DuplicateReport {
        find_duplicates(&build_tree(Lexer::new(src, 1)).unwrap())
    }

    fn props(r: &DuplicateReport) -> Vec<(&str, &str)> {
        r.duplicate_props
            .iter()
            .map(|d| (d.group.as_str(), d.property.as_str()))
            .collect()
    }

    #[test]
    fn test_clean() {
        let r = report("{ a: { flex: 1 }, b: { flex: 1, color: 2 } }");
        assert!(r.is_clean());
    }

    #[test]
    fn test_top_level_repeats() {
        assert_eq!(
            report("{ a: {}, b: {}, a: {} }").top_level_duplicates,
            vec!["a"]
        );
        assert_eq!(
            report("{ a: {}, b: {}, a: {}, a: {} }").top_level_duplicates,
            vec!["a", "a"]
        );
    }

    #[test]
    fn test_property_repeats() {
        let r = report("{\n  row: {\n    flex: 1,\n    color: 2,\n    flex: 3,\n  },\n}");
        assert_eq!(props(&r), vec![("row", "flex")]);
        assert_eq!(r.duplicate_props[0].line, 5);
    }

    #[test]
    fn test_scopes_are_per_group() {
        let r = report("{ a: { flex: 1 }, b: { flex: 1 } }");
        assert!(r.duplicate_props.is_empty());
    }

    #[test]
    fn test_each_group_occurrence_checked() {
        let r = report("{ a: { x: 1, x: 2 }, a: { y: 1, y: 2, y: 3 } }");
        assert_eq!(r.top_level_duplicates, vec!["a"]);
        assert_eq!(props(&r), vec![("a", "x"), ("a", "y"), ("a", "y")]);
    }

    #[test]
    fn test_findings_in_document_order() {
        let r = report("{ b: { p: 1, q: 1, q: 2 }, a: { r: 1, r: 2, p: 1, p: 2 } }");
        assert_eq!(props(&r), vec![("b", "q"), ("a", "r"), ("a", "p")]);
    }

    #[test]
    fn test_nested_keys_ignored() {
        let r = report("{ card: { shadowOffset: { width: 0, width: 1 }, width: 2 } }");
        assert!(r.is_clean());
    }
}
