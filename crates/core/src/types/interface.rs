use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::method::MethodSig;

/// Index of a file inside one loaded unit's file registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(pub usize);

/// Kind of a non-trait top-level item.
///
/// Tracked so a lookup can tell "name does not exist" apart from "name
/// exists but is not a trait".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Struct,
    Enum,
    Union,
    Function,
    TypeAlias,
    Const,
    Static,
    Module,
    Macro,
}

/// A located trait with its completed method set.
///
/// The flattened `methods` list is the trait's own methods plus everything
/// inherited through any chain of supertraits, each signature exactly once,
/// sorted by method name. The record does not own the parsed tree of its
/// anchor file; `file` indexes into the unit that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitInterface {
    pub name: String,
    /// Absolute path of the file the resolution was anchored at
    pub source_file: PathBuf,
    pub file: FileId,
    pub methods: Vec<MethodSig>,
}

impl TraitInterface {
    pub fn method(&self, name: &str) -> Option<&MethodSig> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}
