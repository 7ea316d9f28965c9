//! Output writer trait and associated types
//!
//! Traversals hand converted bytes to an [`OutputWriter`] instead of touching
//! the filesystem themselves, so they can run against an in-memory writer.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Invalid output filename: {0:?}")]
    InvalidFilename(String),

    #[error("No free filename for {0} after {1} attempts")]
    Exhausted(String, u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Where one file should be written
///
/// Built fresh for every write; each target gets its own collision
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub directory: PathBuf,
    pub base_filename: String,
    /// Extension without the leading dot
    pub extension: String,
}

impl OutputTarget {
    pub fn new(
        directory: impl Into<PathBuf>,
        base_filename: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            base_filename: base_filename.into(),
            extension: extension.into(),
        }
    }

    /// File name for the given collision attempt (0 is the unsuffixed name)
    pub fn file_name(&self, attempt: u32) -> String {
        match attempt {
            0 => format!("{}.{}", self.base_filename, self.extension),
            n => format!("{}_{}.{}", self.base_filename, n, self.extension),
        }
    }

    /// Full path for the given collision attempt
    pub fn path(&self, attempt: u32) -> PathBuf {
        self.directory.join(self.file_name(attempt))
    }

    /// Rejects base names that would escape the target directory
    pub fn validate(&self) -> OutputResult<()> {
        let base = self.base_filename.as_str();
        if base.is_empty()
            || base == "."
            || base == ".."
            || base.contains('/')
            || base.contains('\\')
            || base.contains('\0')
        {
            return Err(OutputError::InvalidFilename(base.to_string()));
        }
        Ok(())
    }
}

/// Upper bound on `_N` suffixes tried before giving up
pub const MAX_COLLISION_ATTEMPTS: u32 = 10_000;

/// Finds the first unused path for `target`
///
/// Tries `base.ext`, then `base_1.ext`, `base_2.ext`, ... and returns the
/// first one for which `exists` is false.
pub fn resolve_collision(
    target: &OutputTarget,
    exists: impl Fn(&Path) -> bool,
) -> OutputResult<PathBuf> {
    target.validate()?;
    (0..=MAX_COLLISION_ATTEMPTS)
        .map(|attempt| target.path(attempt))
        .find(|path| !exists(path))
        .ok_or_else(|| {
            OutputError::Exhausted(target.file_name(0), MAX_COLLISION_ATTEMPTS)
        })
}

/// Trait for output writers
pub trait OutputWriter {
    /// Writes `bytes` to a collision-free path derived from `target`
    ///
    /// # Returns
    ///
    /// The path actually written, absolute for filesystem writers
    fn write(&mut self, bytes: &[u8], target: &OutputTarget) -> OutputResult<PathBuf>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for &mut W {
    fn write(&mut self, bytes: &[u8], target: &OutputTarget) -> OutputResult<PathBuf> {
        (**self).write(bytes, target)
    }
}
