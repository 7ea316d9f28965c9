//! Filesystem and in-memory output writers

use crate::output::traits::{
    resolve_collision, OutputError, OutputResult, OutputTarget, OutputWriter,
};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Writes files to disk, creating target directories as needed
///
/// The check-and-append collision policy is not atomic across processes;
/// each operation owns its output directory for the run. Files are opened
/// with `create_new`, so a name taken between the check and the open is
/// retried rather than overwritten.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl FsWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for FsWriter {
    fn write(&mut self, bytes: &[u8], target: &OutputTarget) -> OutputResult<PathBuf> {
        fs::create_dir_all(&target.directory)?;

        loop {
            let path = resolve_collision(target, Path::exists)?;
            if path != target.path(0) {
                tracing::warn!(
                    "File '{}' already exists, writing {} instead",
                    target.path(0).display(),
                    path.display()
                );
            }

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes)?;
                    return Ok(fs::canonicalize(&path)?);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(OutputError::Io(e)),
            }
        }
    }
}

/// Keeps written files in memory; used by tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryWriter {
    files: BTreeMap<PathBuf, Vec<u8>>,
    order: Vec<PathBuf>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a file, as if it already existed
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        let path = path.into();
        if self.files.insert(path.clone(), bytes.into()).is_none() {
            self.order.push(path);
        }
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Content of `path` as UTF-8, if present and valid
    pub fn get_str(&self, path: &Path) -> Option<&str> {
        self.get(path).and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Paths in the order they were written
    pub fn paths(&self) -> &[PathBuf] {
        &self.order
    }

    /// Paths written inside `directory`, in write order
    pub fn paths_in<'a>(&'a self, directory: &'a Path) -> impl Iterator<Item = &'a PathBuf> + 'a {
        self.order
            .iter()
            .filter(move |p| p.parent() == Some(directory))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputWriter for MemoryWriter {
    fn write(&mut self, bytes: &[u8], target: &OutputTarget) -> OutputResult<PathBuf> {
        let path = resolve_collision(target, |p| self.files.contains_key(p))?;
        self.insert(path.clone(), bytes);
        Ok(path)
    }
}
