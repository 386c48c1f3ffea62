use crate::{
    error::{Error, Result},
    parser::utils::node_to_position,
    types::Position,
};
use tree_sitter::{Node, Parser, Tree};

/// Thin wrapper over a tree-sitter parser configured for Rust.
///
/// One instance parses every file of a unit, so all trees share the same
/// grammar configuration.
pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| Error::TreeSitter(format!("failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::TreeSitter("parser returned no tree".to_string()))
    }

    /// Parse and reject sources containing syntax errors.
    ///
    /// Tree-sitter recovers from bad input by inserting ERROR/MISSING nodes;
    /// a unit-wide semantic pass cannot work on such a tree, so the first
    /// error node fails the parse with its position.
    pub fn parse_strict(&mut self, source: &str) -> Result<Tree> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        if root.has_error() {
            let (position, message) = first_syntax_error(&root)
                .unwrap_or((node_to_position(&root, true), "invalid syntax".to_string()));
            return Err(Error::Syntax {
                file: Default::default(),
                position,
                message,
            });
        }
        Ok(tree)
    }
}

fn first_syntax_error(node: &Node) -> Option<(Position, String)> {
    if node.is_error() {
        return Some((node_to_position(node, true), "unexpected token".to_string()));
    }
    if node.is_missing() {
        return Some((
            node_to_position(node, true),
            format!("missing `{}`", node.kind()),
        ));
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_syntax_error(&child) {
            return Some(found);
        }
    }
    None
}
