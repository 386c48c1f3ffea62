use crate::error::{Error, Result};
use crate::types::Position;
use tree_sitter::Node;

pub fn node_to_position(node: &Node, start: bool) -> Position {
    let point = if start {
        node.start_position()
    } else {
        node.end_position()
    };
    Position {
        line: point.row as u32,
        character: point.column as u32,
    }
}

pub fn node_text<'a>(node: &Node, source: &'a str) -> Result<&'a str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::TreeSitter(format!("invalid UTF-8 in source: {e}")))
}
