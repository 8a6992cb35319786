//! Classification of syntax nodes into countable ABC events.
//!
//! The tree-sitter JS/TS grammars differ from ESTree in two ways that
//! matter here: logical operators live inside `binary_expression`, and
//! `if`/`switch` conditions are wrapped in a `parenthesized_expression`.
//! [`NodeKind::of`] resolves the first by inspecting the operator field;
//! [`effective_parent_kind`] resolves the second by skipping parentheses
//! when looking up the parent the suppression rules care about.

use crate::core::FunctionKind;
use tree_sitter::Node;

/// Closed set of node kinds the metric reacts to. Everything else in the
/// grammar is a non-event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Function boundaries
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunction,
    MethodDefinition,
    GeneratorFunction,
    GeneratorFunctionDeclaration,
    // Assignments
    VariableDeclaration,
    Assignment,
    CompoundAssignment,
    UpdateExpression,
    // Short-circuit compound assignment (`||=`, `??=`, `&&=`): a decision
    // point, not an assignment.
    ShortCircuitAssignment,
    // Branches
    CallExpression,
    NewExpression,
    // Conditionals
    TryStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    TernaryExpression,
    LogicalExpression,
    ComparisonExpression,
}

/// The three countable event categories of the ABC metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Assignment,
    Branch,
    Conditional,
}

const LOGICAL_OPERATORS: &[&str] = &["&&", "||", "??"];
const COMPARISON_OPERATORS: &[&str] = &[
    "==", "!=", "===", "!==", "<", ">", "<=", ">=", "instanceof", "in",
];
const SHORT_CIRCUIT_ASSIGN_OPERATORS: &[&str] = &["||=", "??=", "&&="];

impl NodeKind {
    /// Resolve a grammar node into the closed kind set, or `None` for
    /// kinds the metric ignores (including arithmetic binary expressions
    /// and malformed/ERROR nodes).
    pub fn of(node: &Node) -> Option<NodeKind> {
        match node.kind() {
            "function_declaration" => Some(NodeKind::FunctionDeclaration),
            "function_expression" | "function" => Some(NodeKind::FunctionExpression),
            "arrow_function" => Some(NodeKind::ArrowFunction),
            "method_definition" => Some(NodeKind::MethodDefinition),
            "generator_function" => Some(NodeKind::GeneratorFunction),
            "generator_function_declaration" => Some(NodeKind::GeneratorFunctionDeclaration),
            "variable_declaration" | "lexical_declaration" => Some(NodeKind::VariableDeclaration),
            "assignment_expression" => Some(NodeKind::Assignment),
            "augmented_assignment_expression" => match operator_of(node) {
                Some(op) if SHORT_CIRCUIT_ASSIGN_OPERATORS.contains(&op) => {
                    Some(NodeKind::ShortCircuitAssignment)
                }
                Some(_) => Some(NodeKind::CompoundAssignment),
                None => None,
            },
            "update_expression" => Some(NodeKind::UpdateExpression),
            "call_expression" => Some(NodeKind::CallExpression),
            "new_expression" => Some(NodeKind::NewExpression),
            "try_statement" => Some(NodeKind::TryStatement),
            "if_statement" => Some(NodeKind::IfStatement),
            "switch_statement" => Some(NodeKind::SwitchStatement),
            // ESTree models `default:` as a SwitchCase with a null test.
            "switch_case" | "switch_default" => Some(NodeKind::SwitchCase),
            "ternary_expression" => Some(NodeKind::TernaryExpression),
            "binary_expression" => match operator_of(node) {
                Some(op) if LOGICAL_OPERATORS.contains(&op) => Some(NodeKind::LogicalExpression),
                Some(op) if COMPARISON_OPERATORS.contains(&op) => {
                    Some(NodeKind::ComparisonExpression)
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether this kind opens a new function scope, and which kind of
    /// function it is.
    pub fn function_kind(self) -> Option<FunctionKind> {
        match self {
            NodeKind::FunctionDeclaration => Some(FunctionKind::Declaration),
            NodeKind::FunctionExpression => Some(FunctionKind::Expression),
            NodeKind::ArrowFunction => Some(FunctionKind::Arrow),
            NodeKind::MethodDefinition => Some(FunctionKind::Method),
            NodeKind::GeneratorFunction | NodeKind::GeneratorFunctionDeclaration => {
                Some(FunctionKind::Generator)
            }
            _ => None,
        }
    }
}

fn operator_of<'a>(node: &Node<'a>) -> Option<&'a str> {
    // The operator field's node kind is the operator token itself.
    node.child_by_field_name("operator").map(|op| op.kind())
}

/// The parent kind the suppression rules test against: the nearest
/// ancestor that is not a `parenthesized_expression`. ESTree has no
/// parenthesized nodes, so `if (a && b)` must see the `if` as the parent
/// of the logical expression.
pub fn effective_parent_kind(node: &Node) -> Option<NodeKind> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() != "parenthesized_expression" {
            return NodeKind::of(&parent);
        }
        current = parent.parent();
    }
    None
}

/// Map a node kind (plus its effective parent's kind) to a countable
/// category.
///
/// Logical and comparison expressions are suppressed when their parent
/// already represents the same source-level decision; counting both would
/// inflate the score for one decision point.
pub fn classify(kind: NodeKind, parent: Option<NodeKind>) -> Option<Category> {
    match kind {
        NodeKind::VariableDeclaration
        | NodeKind::Assignment
        | NodeKind::CompoundAssignment
        | NodeKind::UpdateExpression => Some(Category::Assignment),

        NodeKind::CallExpression | NodeKind::NewExpression => Some(Category::Branch),

        NodeKind::TryStatement
        | NodeKind::IfStatement
        | NodeKind::SwitchCase
        | NodeKind::TernaryExpression
        | NodeKind::ShortCircuitAssignment => Some(Category::Conditional),

        NodeKind::LogicalExpression => match parent {
            Some(NodeKind::IfStatement)
            | Some(NodeKind::SwitchStatement)
            | Some(NodeKind::TernaryExpression) => None,
            _ => Some(Category::Conditional),
        },

        NodeKind::ComparisonExpression => match parent {
            Some(NodeKind::IfStatement)
            | Some(NodeKind::LogicalExpression)
            | Some(NodeKind::SwitchStatement)
            | Some(NodeKind::TernaryExpression) => None,
            _ => Some(Category::Conditional),
        },

        // Function boundaries open scopes; the switch statement itself is
        // represented by its cases.
        NodeKind::FunctionDeclaration
        | NodeKind::FunctionExpression
        | NodeKind::ArrowFunction
        | NodeKind::MethodDefinition
        | NodeKind::GeneratorFunction
        | NodeKind::GeneratorFunctionDeclaration
        | NodeKind::SwitchStatement => None,
    }
}
