use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, Store};

/// Filesystem-backed store.
///
/// Every path is resolved as `{base_path}/{path}`.
#[derive(Debug, Clone)]
pub struct FsStore {
  base_path: PathBuf,
}

impl FsStore {
  /// Create a new filesystem store rooted at `base_path`.
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  pub fn base_path(&self) -> &Path {
    &self.base_path
  }

  fn resolve(&self, path: &Path) -> PathBuf {
    self.base_path.join(path)
  }
}

fn map_io(path: &Path, e: std::io::Error) -> Error {
  match e.kind() {
    ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
    ErrorKind::AlreadyExists => Error::AlreadyExists(path.to_path_buf()),
    _ => Error::Io(e),
  }
}

impl Store for FsStore {
  fn exists(&self, path: &Path) -> bool {
    self.resolve(path).exists()
  }

  fn is_file(&self, path: &Path) -> bool {
    self.resolve(path).is_file()
  }

  fn is_dir(&self, path: &Path) -> bool {
    self.resolve(path).is_dir()
  }

  fn read_to_string(&self, path: &Path) -> Result<String, Error> {
    fs::read_to_string(self.resolve(path)).map_err(|e| map_io(path, e))
  }

  fn write_file(&self, path: &Path, contents: &str) -> Result<(), Error> {
    debug!(path = %path.display(), bytes = contents.len(), "write_file");
    fs::write(self.resolve(path), contents).map_err(|e| map_io(path, e))
  }

  fn copy_file(&self, from: &Path, to: &Path) -> Result<(), Error> {
    debug!(from = %from.display(), to = %to.display(), "copy_file");
    let src = self.resolve(from);
    fs::copy(&src, self.resolve(to)).map(|_| ()).map_err(|e| {
      if src.exists() {
        map_io(to, e)
      } else {
        map_io(from, e)
      }
    })
  }

  fn make_directories(&self, path: &Path) -> Result<(), Error> {
    fs::create_dir_all(self.resolve(path)).map_err(|e| map_io(path, e))
  }

  fn create_directory(&self, path: &Path) -> Result<(), Error> {
    fs::create_dir(self.resolve(path)).map_err(|e| map_io(path, e))
  }

  fn copy_tree(&self, from: &Path, to: &Path) -> Result<(), Error> {
    let src = self.resolve(from);
    if !src.is_dir() {
      return Err(Error::NotADirectory(from.to_path_buf()));
    }
    let dest = self.resolve(to);
    if dest.exists() {
      return Err(Error::AlreadyExists(to.to_path_buf()));
    }
    debug!(from = %from.display(), to = %to.display(), "copy_tree");
    copy_dir_recursive(&src, &dest)?;
    Ok(())
  }

  fn remove_file(&self, path: &Path) -> Result<(), Error> {
    debug!(path = %path.display(), "remove_file");
    fs::remove_file(self.resolve(path)).map_err(|e| map_io(path, e))
  }

  fn remove_tree(&self, path: &Path) -> Result<(), Error> {
    debug!(path = %path.display(), "remove_tree");
    fs::remove_dir_all(self.resolve(path)).map_err(|e| map_io(path, e))
  }

  fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, Error> {
    let resolved = self.resolve(path);
    if !resolved.is_dir() {
      return Err(if resolved.exists() {
        Error::NotADirectory(path.to_path_buf())
      } else {
        Error::NotFound(path.to_path_buf())
      });
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(&resolved)? {
      entries.push(path.join(entry?.file_name()));
    }
    entries.sort();
    Ok(entries)
  }
}

/// Recursively copy a directory.
fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), std::io::Error> {
  fs::create_dir_all(dest)?;

  for entry in fs::read_dir(src)? {
    let entry = entry?;
    let src_path = entry.path();
    let dest_path = dest.join(entry.file_name());

    if src_path.is_dir() {
      copy_dir_recursive(&src_path, &dest_path)?;
    } else {
      fs::copy(&src_path, &dest_path)?;
    }
  }

  Ok(())
}
