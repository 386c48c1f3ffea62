//! cargo-mocker - locate traits in a source directory and resolve their
//! complete method sets for mock generation
//!
//! This crate provides functionality to:
//! - Parse every `.rs` file of a directory as one compilation unit
//! - Bind top-level trait declarations across files, resolving supertraits
//!   (including standard-library traits) into flattened method sets
//! - Emit mock implementation skeletons from resolved traits
pub mod codegen;
pub mod error;
pub mod loader;
pub mod locator;
pub mod parser;
pub mod resolver;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use loader::SourceUnit;
pub use locator::TraitLocator;
pub use resolver::{StdImporter, SymbolTable, TraitImporter};
