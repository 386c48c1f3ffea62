use std::fmt;

use serde::{Deserialize, Serialize};

use super::interface::FileId;

/// A position in a source file using 0-based line and character indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-based for human-facing output
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A source range tagged with the file it came from.
///
/// All spans produced while loading one unit share the unit's file registry,
/// so spans from different sibling files remain comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub file: FileId,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let a = Position::new(1, 4);
        let b = Position::new(2, 0);
        assert!(a < b);
        assert!(Position::new(1, 5) > a);
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(9, 3).to_string(), "10:4");
    }

    #[test]
    fn test_span_contains() {
        let span = Span {
            file: FileId(0),
            start: Position::new(2, 0),
            end: Position::new(5, 10),
        };
        assert!(span.contains(Position::new(3, 7)));
        assert!(!span.contains(Position::new(6, 0)));
    }
}
