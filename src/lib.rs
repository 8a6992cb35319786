//! Assignment/Branch/Condition size metric for JavaScript and TypeScript.
//!
//! For every function-like unit in a source file, counts assignments (A),
//! branches (B, calls and instantiations), and conditionals (C, decision
//! points with double-counting suppression), scores the unit as
//! `floor(sqrt(A² + B² + C²))`, and reports units whose score strictly
//! exceeds a configured maximum.

pub mod analyzers;
pub mod classifier;
pub mod core;
pub mod scope;
pub mod session;

pub use crate::analyzers::JavaScriptAnalyzer;
pub use crate::classifier::{classify, effective_parent_kind, Category, NodeKind};
pub use crate::core::{AbcConfig, AbcCounts, FunctionKind, Violation};
pub use crate::scope::{FunctionScope, ScopeRegistry};
pub use crate::session::analyze_tree;
