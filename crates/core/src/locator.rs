use std::path::Path;

use tracing::info;

use crate::{
    error::Result,
    loader::{SourceFile, SourceUnit},
    resolver::{StdImporter, SymbolTable, TraitImporter},
    types::TraitInterface,
};

/// Locates trait declarations in a directory of sibling source files.
///
/// One locator is built per request: `parse` loads the unit, binds it, and
/// completes every trait in a single pass. A failed parse produces no
/// locator at all, so every existing locator is queryable and read-only.
pub struct TraitLocator {
    unit: SourceUnit,
    table: SymbolTable,
}

impl TraitLocator {
    /// Parse the directory containing `path` and bind it against the
    /// standard-library importer
    pub fn parse(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse_with(path, &StdImporter)
    }

    /// Parse with caller-supplied trait metadata for external supertraits
    pub fn parse_with(path: impl AsRef<Path>, importer: &dyn TraitImporter) -> Result<Self> {
        let unit = SourceUnit::load(path)?;
        let table = SymbolTable::resolve(&unit, importer)?;
        info!(
            unit = %unit.path().display(),
            interfaces = table.interfaces().len(),
            "resolved source unit"
        );
        Ok(Self { unit, table })
    }

    /// Look up a trait by its top-level name.
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) for an unknown
    /// name and [`Error::NotATrait`](crate::Error::NotATrait) for a name
    /// bound to some other kind of item.
    pub fn find(&self, name: &str) -> Result<&TraitInterface> {
        self.table.find(name)
    }

    /// All traits declared at the unit's top level, sorted by name
    pub fn interfaces(&self) -> Vec<&TraitInterface> {
        self.table.interfaces()
    }

    /// The parsed anchor file the resolution was requested for
    pub fn anchor_file(&self) -> &SourceFile {
        self.unit.file(self.unit.anchor())
    }

    pub fn unit(&self) -> &SourceUnit {
        &self.unit
    }
}
