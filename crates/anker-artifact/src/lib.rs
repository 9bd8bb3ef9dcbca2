//! Anker Artifact
//!
//! This crate provides the file effects capability used by every part of Anker
//! that touches storage: agents writing skeleton outputs, the workspace loader
//! reading plan files, and the practice-case promoter archiving a run.
//!
//! The [`Store`] trait addresses files by paths relative to a workspace root.
//! [`FsStore`] maps them onto the real filesystem; [`MemoryStore`] keeps them in
//! memory so callers can be tested without touching disk.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use std::path::{Path, PathBuf};

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The path does not exist.
  #[error("not found: {}", .0.display())]
  NotFound(PathBuf),

  /// The path already exists and the operation refuses to replace it.
  #[error("already exists: {}", .0.display())]
  AlreadyExists(PathBuf),

  /// A directory was expected at this path.
  #[error("not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  /// A file was expected at this path.
  #[error("not a file: {}", .0.display())]
  NotAFile(PathBuf),

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// File effects over a workspace.
///
/// All paths are relative to the store's root. Implementations are synchronous;
/// callers sharing one root across threads must serialise their calls.
pub trait Store: Send + Sync {
  fn exists(&self, path: &Path) -> bool;

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  fn read_to_string(&self, path: &Path) -> Result<String, Error>;

  /// Write a file, replacing any previous content. The parent directory must
  /// already exist.
  fn write_file(&self, path: &Path, contents: &str) -> Result<(), Error>;

  /// Copy a single file. The destination's parent directory must exist.
  fn copy_file(&self, from: &Path, to: &Path) -> Result<(), Error>;

  /// Create a directory and any missing parents. Existing directories are fine.
  fn make_directories(&self, path: &Path) -> Result<(), Error>;

  /// Create exactly one new directory, failing with [`Error::AlreadyExists`] if
  /// anything is already at `path`.
  fn create_directory(&self, path: &Path) -> Result<(), Error>;

  /// Recursively copy a directory to a destination that does not exist yet.
  fn copy_tree(&self, from: &Path, to: &Path) -> Result<(), Error>;

  /// Remove a single file.
  fn remove_file(&self, path: &Path) -> Result<(), Error>;

  /// Recursively remove a directory.
  fn remove_tree(&self, path: &Path) -> Result<(), Error>;

  /// Entries directly inside a directory, sorted by path.
  fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, Error>;
}
