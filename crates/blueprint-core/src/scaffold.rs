use crate::error::Result;
use crate::{io, paths};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files produced by a blueprint, keyed by path relative to the output
/// directory. Nothing touches disk until [`Scaffold::write_to`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scaffold {
    files: BTreeMap<PathBuf, String>,
}

impl Scaffold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file. Paths must be relative and stay inside the
    /// output directory.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Result<()> {
        let path = path.into();
        paths::validate_relative(&path)?;
        if self.files.insert(path.clone(), contents.into()).is_some() {
            tracing::debug!(path = %path.display(), "scaffold file replaced");
        }
        Ok(())
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file under `outdir`, overwriting existing files. Returns
    /// the written paths.
    pub fn write_to(&self, outdir: &Path) -> Result<Vec<PathBuf>> {
        io::ensure_dir(outdir)?;
        let mut written = Vec::with_capacity(self.files.len());
        for (rel, contents) in &self.files {
            let dest = outdir.join(rel);
            io::atomic_write(&dest, contents.as_bytes())?;
            tracing::info!(path = %dest.display(), "wrote scaffold file");
            written.push(dest);
        }
        Ok(written)
    }
}
