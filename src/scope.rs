//! Per-function accumulation of countable events.

use crate::classifier::Category;
use crate::core::{AbcCounts, FunctionKind};
use log::trace;
use std::collections::HashMap;
use tree_sitter::Node;

/// Accumulator for one function-like unit. Holds the event node ids per
/// category; only the counts feed the metric, the ids are kept so a
/// reporting layer can point at individual events.
#[derive(Clone, Debug)]
pub struct FunctionScope {
    pub name: String,
    pub kind: FunctionKind,
    /// 1-based start line of the defining node.
    pub line: usize,
    assignments: Vec<usize>,
    branches: Vec<usize>,
    conditionals: Vec<usize>,
}

impl FunctionScope {
    fn new(name: String, kind: FunctionKind, line: usize) -> Self {
        Self {
            name,
            kind,
            line,
            assignments: Vec::new(),
            branches: Vec::new(),
            conditionals: Vec::new(),
        }
    }

    fn push(&mut self, category: Category, node_id: usize) {
        match category {
            Category::Assignment => self.assignments.push(node_id),
            Category::Branch => self.branches.push(node_id),
            Category::Conditional => self.conditionals.push(node_id),
        }
    }

    pub fn counts(&self) -> AbcCounts {
        AbcCounts::new(
            self.assignments.len() as u32,
            self.branches.len() as u32,
            self.conditionals.len() as u32,
        )
    }
}

/// Session-owned registry of function scopes, in first-visit order.
///
/// Keyed by `Node::id`, which is stable for the lifetime of the tree. The
/// registry never stores node references, so it outlives nothing.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    scopes: Vec<FunctionScope>,
    index: HashMap<usize, usize>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, empty scope for a function-boundary node. Must be
    /// called before any event inside that function is recorded; the
    /// pre-order traversal guarantees this.
    pub fn register(&mut self, node: &Node, name: String, kind: FunctionKind) {
        let line = node.start_position().row + 1;
        self.index.insert(node.id(), self.scopes.len());
        self.scopes.push(FunctionScope::new(name, kind, line));
    }

    /// Attribute an event to the nearest enclosing function scope, found
    /// by walking parent links outward from the event node. Events with
    /// no enclosing function (top-level module code) are dropped.
    pub fn record(&mut self, category: Category, node: &Node) {
        let mut current = node.parent();
        while let Some(ancestor) = current {
            if let Some(&slot) = self.index.get(&ancestor.id()) {
                self.scopes[slot].push(category, node.id());
                return;
            }
            current = ancestor.parent();
        }
        trace!(
            "dropping {:?} event at line {}: no enclosing function",
            category,
            node.start_position().row + 1
        );
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Consume the registry, yielding scopes in first-visit order.
    pub fn into_scopes(self) -> Vec<FunctionScope> {
        self.scopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(source: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    fn first_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
        if node.kind() == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        children.into_iter().find_map(|c| first_of_kind(c, kind))
    }

    #[test]
    fn events_attribute_to_nearest_enclosing_function() {
        let source = "function outer() { function inner() { g(); } }";
        let tree = parse(source);
        let root = tree.root_node();
        let outer = first_of_kind(root, "function_declaration").unwrap();
        let inner = first_of_kind(outer.child_by_field_name("body").unwrap(),
            "function_declaration")
            .unwrap();
        let call = first_of_kind(root, "call_expression").unwrap();

        let mut registry = ScopeRegistry::new();
        registry.register(&outer, "outer".into(), FunctionKind::Declaration);
        registry.register(&inner, "inner".into(), FunctionKind::Declaration);
        registry.record(Category::Branch, &call);

        let scopes = registry.into_scopes();
        assert_eq!(scopes[0].counts(), AbcCounts::default());
        assert_eq!(scopes[1].counts(), AbcCounts::new(0, 1, 0));
    }

    #[test]
    fn top_level_events_are_dropped() {
        let source = "g();";
        let tree = parse(source);
        let call = first_of_kind(tree.root_node(), "call_expression").unwrap();

        let mut registry = ScopeRegistry::new();
        registry.record(Category::Branch, &call);
        assert!(registry.is_empty());
    }

    #[test]
    fn scopes_keep_first_visit_order() {
        let source = "function a() {} function b() {}";
        let tree = parse(source);
        let root = tree.root_node();
        let first = root.named_child(0).unwrap();
        let second = root.named_child(1).unwrap();

        let mut registry = ScopeRegistry::new();
        registry.register(&first, "a".into(), FunctionKind::Declaration);
        registry.register(&second, "b".into(), FunctionKind::Declaration);

        let names: Vec<_> = registry
            .into_scopes()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
