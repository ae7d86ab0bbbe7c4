//! Domain models for selections and the per-invocation name sets.

use std::fs;
use std::path::{Path, PathBuf};

/// A selected filesystem entry as handed over by the file manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub path: PathBuf,
}

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Follow symbolic links to the underlying entry.
    ///
    /// Dangling links and unreadable paths resolve to themselves so the entry can still be
    /// reported by name.
    pub fn resolve(&self) -> PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }
}

/// Plain name of an entry, without its parent directories.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Ordered list of references passed to one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionBatch {
    refs: Vec<FileReference>,
}

impl SelectionBatch {
    pub fn new(refs: Vec<FileReference>) -> Self {
        Self { refs }
    }

    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(paths.into_iter().map(FileReference::new).collect())
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileReference> {
        self.refs.iter()
    }
}

/// Insertion-ordered set of names. Each name is kept once, at its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    names: Vec<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` unless already present. Returns `true` when it was inserted.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

/// Everything one pass over a selection learned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyOutcome {
    /// Every distinct origin package seen, whether it was found or not.
    pub packages: NameSet,
    /// Base names of files without a recorded origin package.
    pub unattributed: NameSet,
    /// Packages that were not present in any storage location.
    pub unresolved: NameSet,
    /// Number of distinct packages opened in at least one location.
    pub opened: usize,
}

impl ClassifyOutcome {
    pub fn found_some(&self) -> bool {
        self.opened > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_set_keeps_first_occurrence_order() {
        let mut set = NameSet::new();
        assert!(set.insert("b.hpkg"));
        assert!(set.insert("a.hpkg"));
        assert!(!set.insert("b.hpkg"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.first(), Some("b.hpkg"));
        assert_eq!(set.as_slice(), ["b.hpkg", "a.hpkg"]);
    }

    #[cfg(unix)]
    #[test]
    fn resolve_follows_symlinks() -> std::io::Result<()> {
        let temp = tempfile::tempdir()?;
        let target = temp.path().join("real.txt");
        fs::write(&target, b"data")?;

        let link = temp.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link)?;
        let resolved = FileReference::new(&link).resolve();
        assert_eq!(base_name(&resolved), "real.txt");
        Ok(())
    }

    #[test]
    fn resolve_keeps_missing_paths() {
        let reference = FileReference::new("/definitely/not/here.txt");
        assert_eq!(reference.resolve(), PathBuf::from("/definitely/not/here.txt"));
        assert_eq!(base_name(&reference.resolve()), "here.txt");
    }
}
