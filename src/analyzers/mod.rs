//! Parser ownership and the entry point callers use per source file.

use crate::core::{AbcConfig, Violation};
use crate::session::analyze_tree;
use anyhow::{Context, Result};
use tree_sitter::Parser;

/// Analyzer for JavaScript or TypeScript source. Owns the parser; one
/// analyzer handles any number of files sequentially, and independent
/// analyzers can run concurrently.
pub struct JavaScriptAnalyzer {
    parser: Parser,
    config: AbcConfig,
}

impl JavaScriptAnalyzer {
    pub fn new_javascript() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .context("Failed to set JavaScript language")?;
        Ok(Self {
            parser,
            config: AbcConfig::default(),
        })
    }

    pub fn new_typescript() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .context("Failed to set TypeScript language")?;
        Ok(Self {
            parser,
            config: AbcConfig::default(),
        })
    }

    pub fn with_config(mut self, config: AbcConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max(self, max: u32) -> Self {
        self.with_config(AbcConfig::with_max(max))
    }

    /// Parse one source file and return its ABC size violations, in the
    /// order the offending functions appear.
    pub fn analyze(&mut self, source: &str) -> Result<Vec<Violation>> {
        let tree = self
            .parser
            .parse(source, None)
            .context("Failed to parse source")?;
        Ok(analyze_tree(tree.root_node(), source, &self.config))
    }
}
