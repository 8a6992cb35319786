use serde::{Deserialize, Serialize};

/// Per-function event tallies for the ABC metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbcCounts {
    pub assignments: u32,
    pub branches: u32,
    pub conditionals: u32,
}

impl AbcCounts {
    pub fn new(assignments: u32, branches: u32, conditionals: u32) -> Self {
        Self {
            assignments,
            branches,
            conditionals,
        }
    }

    /// ABC size: `floor(sqrt(A² + B² + C²))`, truncated toward zero.
    pub fn size(&self) -> u32 {
        let a = u64::from(self.assignments);
        let b = u64::from(self.branches);
        let c = u64::from(self.conditionals);
        let sum = a * a + b * b + c * c;
        (sum as f64).sqrt().floor() as u32
    }
}

/// Which function-like construct a scope was created for.
///
/// Variants are named after the ESTree node types so reports line up with
/// what JS tooling calls these constructs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
    Method,
    Generator,
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FunctionKind::Declaration => "FunctionDeclaration",
            FunctionKind::Expression => "FunctionExpression",
            FunctionKind::Arrow => "ArrowFunctionExpression",
            FunctionKind::Method => "MethodDefinition",
            FunctionKind::Generator => "GeneratorFunction",
        };
        write!(f, "{name}")
    }
}

/// A function whose ABC size exceeded the configured maximum.
///
/// Snapshot taken once per offending function at the end of a traversal
/// session; immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub function: String,
    pub kind: FunctionKind,
    pub line: usize,
    pub size: u32,
    pub max: u32,
    pub counts: AbcCounts,
}

impl Violation {
    pub fn message(&self) -> String {
        format!(
            "Function ABC Size {} exceeds maximum {} ({}/{}/{}).",
            self.size,
            self.max,
            self.counts.assignments,
            self.counts.branches,
            self.counts.conditionals
        )
    }
}

/// Threshold configuration for an analysis session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbcConfig {
    /// Maximum allowed ABC size. A function violates only when its size is
    /// strictly greater than this.
    #[serde(default = "default_max_abc_size")]
    pub max: u32,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self {
            max: default_max_abc_size(),
        }
    }
}

impl AbcConfig {
    pub fn with_max(max: u32) -> Self {
        Self { max }
    }
}

fn default_max_abc_size() -> u32 {
    17
}
