//! One analysis session: a single pre-order walk over a parsed tree,
//! followed by the metric calculation.

use crate::classifier::{classify, effective_parent_kind, Category, NodeKind};
use crate::core::{AbcConfig, Violation};
use crate::scope::ScopeRegistry;
use log::debug;
use tree_sitter::{Node, TreeCursor};

/// Session-scoped state for one tree. Constructed fresh per analysis and
/// discarded at the end, so independent trees can be analyzed concurrently
/// without shared state.
pub struct AnalysisSession<'a> {
    source: &'a str,
    registry: ScopeRegistry,
}

/// Analyze a parsed tree and return violations in the order their defining
/// nodes were first visited.
pub fn analyze_tree(root: Node, source: &str, config: &AbcConfig) -> Vec<Violation> {
    let mut session = AnalysisSession {
        source,
        registry: ScopeRegistry::new(),
    };
    let mut cursor = root.walk();
    session.visit(&mut cursor);
    session.finish(config)
}

impl<'a> AnalysisSession<'a> {
    /// Pre-order walk: a node is dispatched before its descendants, so
    /// function boundaries are registered before any event inside them.
    fn visit(&mut self, cursor: &mut TreeCursor) {
        self.dispatch(cursor.node());

        if cursor.goto_first_child() {
            loop {
                self.visit(cursor);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    fn dispatch(&mut self, node: Node) {
        let Some(kind) = NodeKind::of(&node) else {
            return;
        };

        if let Some(function_kind) = kind.function_kind() {
            let name = function_name(node, self.source);
            self.registry.register(&node, name, function_kind);
            return;
        }

        let parent = effective_parent_kind(&node);
        if let Some(category) = classify(kind, parent) {
            self.registry.record(category, &node);
            // The alternate control path through a terminal `else` or a
            // `catch` handler is an extra decision on the same node.
            if category == Category::Conditional && has_alternate_path(node, kind) {
                self.registry.record(Category::Conditional, &node);
            }
        }
    }

    fn finish(self, config: &AbcConfig) -> Vec<Violation> {
        debug!("session tracked {} function scope(s)", self.registry.len());
        self.registry
            .into_scopes()
            .into_iter()
            .filter_map(|scope| {
                let counts = scope.counts();
                let size = counts.size();
                (size > config.max).then(|| Violation {
                    function: scope.name,
                    kind: scope.kind,
                    line: scope.line,
                    size,
                    max: config.max,
                    counts,
                })
            })
            .collect()
    }
}

/// An `if` with a terminal `else` (not an `else if` continuation) or a
/// `try` with a catch handler contributes one extra conditional.
fn has_alternate_path(node: Node, kind: NodeKind) -> bool {
    match kind {
        NodeKind::IfStatement => node
            .child_by_field_name("alternative")
            .is_some_and(|clause| {
                clause
                    .named_child(0)
                    .map_or(true, |body| body.kind() != "if_statement")
            }),
        NodeKind::TryStatement => node.child_by_field_name("handler").is_some(),
        _ => false,
    }
}

/// Best-effort function name: the node's own `name` field, else the
/// binding it is assigned to, else `<anonymous>`.
fn function_name(node: Node, source: &str) -> String {
    if let Some(name) = node.child_by_field_name("name") {
        if let Ok(text) = name.utf8_text(source.as_bytes()) {
            return text.to_string();
        }
    }

    if let Some(parent) = node.parent() {
        let binding = match parent.kind() {
            "variable_declarator" => parent.child_by_field_name("name"),
            "pair" => parent.child_by_field_name("key"),
            _ => None,
        };
        if let Some(name) = binding {
            if let Ok(text) = name.utf8_text(source.as_bytes()) {
                return text.to_string();
            }
        }
    }

    "<anonymous>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AbcCounts;
    use tree_sitter::Parser;

    fn analyze(source: &str, max: u32) -> Vec<Violation> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        analyze_tree(tree.root_node(), source, &AbcConfig::with_max(max))
    }

    #[test]
    fn empty_tree_yields_no_violations() {
        assert!(analyze("", 0).is_empty());
    }

    #[test]
    fn tree_without_functions_yields_no_violations() {
        assert!(analyze("var x = 1; f(); if (x) { }", 0).is_empty());
    }

    #[test]
    fn boundary_size_equal_to_max_does_not_violate() {
        // One declaration: size 1.
        assert!(analyze("function f() { var x = 1; }", 1).is_empty());
        assert_eq!(analyze("function f() { var x = 1; }", 0).len(), 1);
    }

    #[test]
    fn names_come_from_declaration_or_binding() {
        let source = "function f() { const g = () => { h(); i(); }; }";
        let violations = analyze(source, 0);
        let names: Vec<_> = violations.iter().map(|v| v.function.as_str()).collect();
        assert_eq!(names, vec!["f", "g"]);
    }

    #[test]
    fn anonymous_functions_are_labeled() {
        let source = "register(function () { var x = 1; });";
        let violations = analyze(source, 0);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].function, "<anonymous>");
    }

    #[test]
    fn malformed_source_never_panics() {
        let violations = analyze("function f( { if ) { g(; }", 0);
        // Whatever the parser salvaged, the session must survive it.
        drop(violations);
    }

    #[test]
    fn method_bodies_get_their_own_scope() {
        let source = "class A { m() { let x = 1; n(); } }";
        let violations = analyze(source, 0);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].function, "m");
        assert_eq!(violations[0].counts, AbcCounts::new(1, 1, 0));
    }
}
