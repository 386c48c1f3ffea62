//! Rust source parsing and top-level item extraction using tree-sitter

pub mod item_collector;
pub mod rust_parser;
pub mod utils;

// Re-export commonly used items
pub use item_collector::{FileItems, TraitDecl, collect_items};
pub use rust_parser::RustParser;
pub use utils::{node_text, node_to_position};
