//! Whole-unit semantic binding of trait declarations.
//!
//! Consumes every parsed file of a [`SourceUnit`](crate::loader::SourceUnit)
//! as one translation unit: top-level items from all files merge into a
//! single package-level symbol table, supertrait references resolve within
//! the unit first and then through the injected [`TraitImporter`], and each
//! trait's method set is flattened eagerly. The resulting table is immutable;
//! queries never mutate it.

pub mod importer;

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::{
    error::{Error, Result},
    loader::SourceUnit,
    parser::{TraitDecl, collect_items},
    types::{ItemKind, MethodSig, TraitInterface},
};

pub use importer::{ExternalTrait, StdImporter, TraitImporter};

/// The unit's bound top-level names, produced once per load
pub struct SymbolTable {
    traits: BTreeMap<String, TraitInterface>,
    others: BTreeMap<String, ItemKind>,
}

impl SymbolTable {
    /// Bind the whole unit and complete every trait it declares.
    ///
    /// Any unresolved supertrait, duplicate declaration, or signature
    /// conflict fails the entire pass; no partial table is ever returned.
    pub fn resolve(unit: &SourceUnit, importer: &dyn TraitImporter) -> Result<Self> {
        let mut decls: BTreeMap<String, TraitDecl> = BTreeMap::new();
        let mut others: BTreeMap<String, ItemKind> = BTreeMap::new();

        for (id, file) in unit.files() {
            let items = collect_items(&file.tree, &file.source, id)?;
            for decl in items.traits {
                let clash = others.contains_key(&decl.name);
                let span = decl.span;
                if decls.insert(decl.name.clone(), decl.clone()).is_some() || clash {
                    return Err(Error::Semantic(format!(
                        "`{}` is declared more than once in the unit (see {} at {})",
                        decl.name,
                        unit.file(span.file).path.display(),
                        span.start,
                    )));
                }
            }
            for (name, kind) in items.others {
                let clash = decls.contains_key(&name);
                if others.insert(name.clone(), kind).is_some() || clash {
                    return Err(Error::Semantic(format!(
                        "`{name}` is declared more than once in the unit"
                    )));
                }
            }
        }
        debug!(
            traits = decls.len(),
            other_items = others.len(),
            "collected top-level items"
        );

        let mut flattener = Flattener {
            decls: &decls,
            importer,
            done: HashMap::new(),
            in_progress: HashSet::new(),
        };

        let mut traits = BTreeMap::new();
        for name in decls.keys() {
            let methods = flattener.flatten(name)?;
            traits.insert(
                name.clone(),
                TraitInterface {
                    name: name.clone(),
                    source_file: unit.path().to_path_buf(),
                    file: unit.anchor(),
                    methods,
                },
            );
        }

        Ok(Self { traits, others })
    }

    /// Look up a top-level name, distinguishing absent names from names
    /// bound to non-trait items
    pub fn find(&self, name: &str) -> Result<&TraitInterface> {
        if let Some(iface) = self.traits.get(name) {
            return Ok(iface);
        }
        if self.others.contains_key(name) {
            return Err(Error::NotATrait(name.to_string()));
        }
        Err(Error::NotFound(name.to_string()))
    }

    /// Every trait declared at the unit's top level, sorted by name
    pub fn interfaces(&self) -> Vec<&TraitInterface> {
        self.traits.values().collect()
    }
}

struct Flattener<'a> {
    decls: &'a BTreeMap<String, TraitDecl>,
    importer: &'a dyn TraitImporter,
    done: HashMap<String, Vec<MethodSig>>,
    in_progress: HashSet<String>,
}

impl Flattener<'_> {
    /// Complete one unit trait: its own methods plus everything inherited
    /// transitively, deduplicated by exact signature
    fn flatten(&mut self, name: &str) -> Result<Vec<MethodSig>> {
        if let Some(methods) = self.done.get(name) {
            return Ok(methods.clone());
        }
        if !self.in_progress.insert(name.to_string()) {
            return Err(Error::Semantic(format!(
                "supertrait cycle involving `{name}`"
            )));
        }

        let decl = self.decls[name].clone();
        let mut methods: BTreeMap<String, MethodSig> = BTreeMap::new();
        for sig in decl.methods {
            merge_method(&mut methods, sig, name)?;
        }
        for supertrait in decl.supertraits {
            let inherited = self.resolve_supertrait(name, &supertrait)?;
            for sig in inherited {
                merge_method(&mut methods, sig, name)?;
            }
        }

        self.in_progress.remove(name);
        let methods: Vec<MethodSig> = methods.into_values().collect();
        self.done.insert(name.to_string(), methods.clone());
        Ok(methods)
    }

    fn resolve_supertrait(&mut self, of: &str, path: &str) -> Result<Vec<MethodSig>> {
        // Unqualified names bind inside the unit before falling back to
        // imported metadata, matching ordinary scope shadowing.
        if !path.contains("::") && self.decls.contains_key(path) {
            return self.flatten(path);
        }
        self.flatten_external(of, path)
    }

    fn flatten_external(&mut self, of: &str, path: &str) -> Result<Vec<MethodSig>> {
        let external = self.importer.lookup(path).ok_or_else(|| {
            Error::Semantic(format!("cannot resolve supertrait `{path}` of `{of}`"))
        })?;
        if !self.in_progress.insert(external.path.clone()) {
            return Err(Error::Semantic(format!(
                "supertrait cycle involving `{}`",
                external.path
            )));
        }

        let mut methods: BTreeMap<String, MethodSig> = BTreeMap::new();
        for sig in external.methods {
            merge_method(&mut methods, sig, &external.path)?;
        }
        for supertrait in &external.supertraits {
            for sig in self.flatten_external(&external.path, supertrait)? {
                merge_method(&mut methods, sig, &external.path)?;
            }
        }

        self.in_progress.remove(&external.path);
        Ok(methods.into_values().collect())
    }
}

fn merge_method(
    methods: &mut BTreeMap<String, MethodSig>,
    sig: MethodSig,
    owner: &str,
) -> Result<()> {
    match methods.get(&sig.name) {
        None => {
            methods.insert(sig.name.clone(), sig);
            Ok(())
        }
        Some(existing) if *existing == sig => Ok(()),
        Some(existing) => Err(Error::Semantic(format!(
            "`{owner}` inherits conflicting signatures for `{}`: `{existing}` vs `{sig}`",
            sig.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn resolve(files: &[(&str, &str)]) -> Result<SymbolTable> {
        let dir = TempDir::new().unwrap();
        let mut first = PathBuf::new();
        for (i, (name, source)) in files.iter().enumerate() {
            let path = dir.path().join(name);
            fs::write(&path, source).unwrap();
            if i == 0 {
                first = path;
            }
        }
        let unit = SourceUnit::load(&first).unwrap();
        SymbolTable::resolve(&unit, &StdImporter)
    }

    #[test]
    fn test_same_unit_supertrait_flattens() {
        let table = resolve(&[(
            "traits.rs",
            r#"
trait Greeter { fn greet(&self) -> String; }
trait Named: Greeter { fn name(&self) -> String; }
"#,
        )])
        .unwrap();
        let named = table.find("Named").unwrap();
        assert_eq!(named.method_names(), vec!["greet", "name"]);
    }

    #[test]
    fn test_cross_file_supertrait_resolves() {
        let table = resolve(&[
            ("b.rs", "trait Named: Greeter { fn name(&self) -> String; }"),
            ("a.rs", "trait Greeter { fn greet(&self) -> String; }"),
        ])
        .unwrap();
        let named = table.find("Named").unwrap();
        assert_eq!(named.method_names(), vec!["greet", "name"]);
    }

    #[test]
    fn test_external_transitive_chain() {
        // A embeds B (same unit), B embeds Error (external), which itself
        // pulls in Debug and Display.
        let table = resolve(&[(
            "chain.rs",
            r#"
trait Failing: std::error::Error { fn code(&self) -> u32; }
trait Reporting: Failing { fn report(&self); }
"#,
        )])
        .unwrap();
        let reporting = table.find("Reporting").unwrap();
        assert_eq!(
            reporting.method_names(),
            vec!["code", "fmt", "report", "source"]
        );
    }

    #[test]
    fn test_identical_signatures_dedup_across_paths() {
        // Debug::fmt and Display::fmt resolve to the same signature and
        // must appear once.
        let table = resolve(&[(
            "pretty.rs",
            "trait Pretty: std::fmt::Debug + std::fmt::Display {}",
        )])
        .unwrap();
        let pretty = table.find("Pretty").unwrap();
        assert_eq!(pretty.method_names(), vec!["fmt"]);
    }

    #[test]
    fn test_conflicting_inherited_signatures_fail() {
        let result = resolve(&[(
            "clash.rs",
            r#"
trait A { fn go(&self) -> u8; }
trait B { fn go(&self) -> u16; }
trait Both: A + B {}
"#,
        )]);
        assert!(matches!(result, Err(Error::Semantic(_))));
    }

    #[test]
    fn test_unresolved_supertrait_fails_resolution() {
        let result = resolve(&[("dangling.rs", "trait Widget: missing::Base {}")]);
        match result {
            Err(Error::Semantic(message)) => assert!(message.contains("missing::Base")),
            other => panic!("expected semantic error, got {:?}", other.err().map(|e| e.to_string())),
        }
    }

    #[test]
    fn test_supertrait_cycle_fails_resolution() {
        let result = resolve(&[(
            "cycle.rs",
            r#"
trait A: B {}
trait B: A {}
"#,
        )]);
        assert!(matches!(result, Err(Error::Semantic(_))));
    }

    #[test]
    fn test_duplicate_declaration_across_files_fails() {
        let result = resolve(&[
            ("a.rs", "trait Twin {}"),
            ("b.rs", "trait Twin {}"),
        ]);
        assert!(matches!(result, Err(Error::Semantic(_))));
    }

    #[test]
    fn test_find_distinguishes_missing_from_non_trait() {
        let table = resolve(&[("lib.rs", "struct T;")]).unwrap();
        assert!(matches!(table.find("T"), Err(Error::NotATrait(_))));
        assert!(matches!(
            table.find("DoesNotExist"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_interfaces_sorted_and_traits_only() {
        let table = resolve(&[(
            "mixed.rs",
            r#"
struct Helper;
trait Zeta {}
fn run() {}
trait Alpha {}
"#,
        )])
        .unwrap();
        let names: Vec<_> = table.interfaces().iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_prelude_supertrait_resolves_via_importer() {
        let table = resolve(&[("it.rs", "trait Stream: Iterator {}")]).unwrap();
        let stream = table.find("Stream").unwrap();
        assert_eq!(stream.method_names(), vec!["next"]);
    }

    #[test]
    fn test_unit_trait_shadows_prelude_name() {
        let table = resolve(&[(
            "shadow.rs",
            r#"
trait Clone { fn duplicate(&self) -> Self; }
trait Copier: Clone {}
"#,
        )])
        .unwrap();
        let copier = table.find("Copier").unwrap();
        assert_eq!(copier.method_names(), vec!["duplicate"]);
    }
}
