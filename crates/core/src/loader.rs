use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use tree_sitter::Tree;

use crate::{
    error::{Error, Result},
    parser::RustParser,
    types::FileId,
};

/// One parsed file of a unit
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
}

/// Every `.rs` file of one directory, parsed as a single unit.
///
/// The unit owns all sources and trees; everything downstream refers to
/// them by [`FileId`], which doubles as the shared position registry: spans
/// from different files of the same unit are directly comparable.
pub struct SourceUnit {
    files: Vec<SourceFile>,
    anchor: FileId,
    /// Absolute path of the requested file
    path: PathBuf,
}

impl SourceUnit {
    /// Parse the directory containing `path` as one unit.
    ///
    /// Fails on the first unreadable or syntactically invalid sibling; no
    /// partial unit is ever returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut siblings: Vec<PathBuf> = fs::read_dir(dir)?
            .collect::<io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("rs") && p.is_file())
            .collect();
        // Deterministic parse order regardless of directory iteration order
        siblings.sort();

        let anchor_name = path.file_name().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            ))
        })?;

        let mut parser = RustParser::new()?;
        let mut files = Vec::with_capacity(siblings.len());
        let mut anchor = None;

        for sibling in siblings {
            let source = fs::read_to_string(&sibling)?;
            let tree = parser.parse_strict(&source).map_err(|e| match e {
                Error::Syntax {
                    position, message, ..
                } => Error::Syntax {
                    file: sibling.clone(),
                    position,
                    message,
                },
                other => other,
            })?;
            debug!(file = %sibling.display(), "parsed unit member");

            // The anchor is matched by file name, not full path
            if sibling.file_name() == Some(anchor_name) {
                anchor = Some(FileId(files.len()));
            }
            files.push(SourceFile {
                path: sibling,
                source,
                tree,
            });
        }

        let anchor = anchor.ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not part of the unit", path.display()),
            ))
        })?;
        let path = fs::canonicalize(path)?;
        debug!(unit = %path.display(), files = files.len(), "loaded source unit");

        Ok(Self {
            files,
            anchor,
            path,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files.iter().enumerate().map(|(i, f)| (FileId(i), f))
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0]
    }

    /// The parsed tree of the originally requested file
    pub fn anchor(&self) -> FileId {
        self.anchor
    }

    /// Absolute path of the originally requested file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, source: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn test_load_parses_all_siblings() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.rs", "trait A {}");
        let b = write(&dir, "b.rs", "trait B {}");
        write(&dir, "notes.txt", "not rust");

        let unit = SourceUnit::load(&b).unwrap();
        assert_eq!(unit.len(), 2);
        assert_eq!(unit.file(unit.anchor()).path.file_name().unwrap(), "b.rs");
        assert!(unit.path().is_absolute());
    }

    #[test]
    fn test_load_missing_directory() {
        let result = SourceUnit::load("/does/not/exist/lib.rs");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_requested_file_absent() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.rs", "trait A {}");

        let result = SourceUnit::load(dir.path().join("missing.rs"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_broken_sibling_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.rs", "trait A {}");
        write(&dir, "broken.rs", "trait Broken { fn oops(&self -> u8; }");

        let result = SourceUnit::load(&a);
        match result {
            Err(Error::Syntax { file, .. }) => {
                assert_eq!(file.file_name().unwrap(), "broken.rs");
            }
            other => panic!("expected syntax error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_files_are_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        write(&dir, "zeta.rs", "");
        let alpha = write(&dir, "alpha.rs", "");
        write(&dir, "mid.rs", "");

        let unit = SourceUnit::load(&alpha).unwrap();
        let names: Vec<_> = unit
            .files()
            .map(|(_, f)| f.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["alpha.rs", "mid.rs", "zeta.rs"]);
    }
}
