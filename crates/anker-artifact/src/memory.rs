use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Error, Store};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
  File(String),
  Dir,
}

/// In-memory store.
///
/// Behaves like [`crate::FsStore`] over an empty directory: the root always
/// exists, writes need an existing parent, and directory operations follow the
/// same rules. Intended for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<BTreeMap<PathBuf, Entry>>,
}

/// Collapse `.` and `..` so equal paths map to one key.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::Normal(part) => out.push(part),
      Component::ParentDir => {
        out.pop();
      }
      Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
    }
  }
  out
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a file, creating any missing parent directories.
  pub fn insert_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) -> Result<(), Error> {
    let path = normalize(path.as_ref());
    if let Some(parent) = path.parent() {
      self.make_directories(parent)?;
    }
    self.write_file(&path, &contents.into())
  }

  /// Relative paths of every file currently stored, in sorted order.
  pub fn files(&self) -> Vec<PathBuf> {
    self
      .read()
      .iter()
      .filter(|(_, entry)| matches!(entry, Entry::File(_)))
      .map(|(path, _)| path.clone())
      .collect()
  }

  fn read(&self) -> RwLockReadGuard<'_, BTreeMap<PathBuf, Entry>> {
    self.entries.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<PathBuf, Entry>> {
    self.entries.write().unwrap_or_else(PoisonError::into_inner)
  }

  fn is_dir_in(entries: &BTreeMap<PathBuf, Entry>, path: &Path) -> bool {
    path.as_os_str().is_empty() || matches!(entries.get(path), Some(Entry::Dir))
  }

  fn require_parent(entries: &BTreeMap<PathBuf, Entry>, path: &Path) -> Result<(), Error> {
    let parent = path.parent().unwrap_or(Path::new(""));
    if Self::is_dir_in(entries, parent) {
      Ok(())
    } else {
      Err(Error::NotFound(parent.to_path_buf()))
    }
  }
}

impl Store for MemoryStore {
  fn exists(&self, path: &Path) -> bool {
    let path = normalize(path);
    path.as_os_str().is_empty() || self.read().contains_key(&path)
  }

  fn is_file(&self, path: &Path) -> bool {
    matches!(self.read().get(&normalize(path)), Some(Entry::File(_)))
  }

  fn is_dir(&self, path: &Path) -> bool {
    Self::is_dir_in(&self.read(), &normalize(path))
  }

  fn read_to_string(&self, path: &Path) -> Result<String, Error> {
    let path = normalize(path);
    match self.read().get(&path) {
      Some(Entry::File(contents)) => Ok(contents.clone()),
      Some(Entry::Dir) => Err(Error::NotAFile(path)),
      None => Err(Error::NotFound(path)),
    }
  }

  fn write_file(&self, path: &Path, contents: &str) -> Result<(), Error> {
    let path = normalize(path);
    let mut entries = self.write();
    Self::require_parent(&entries, &path)?;
    if Self::is_dir_in(&entries, &path) {
      return Err(Error::NotAFile(path));
    }
    entries.insert(path, Entry::File(contents.to_string()));
    Ok(())
  }

  fn copy_file(&self, from: &Path, to: &Path) -> Result<(), Error> {
    let contents = self.read_to_string(from)?;
    self.write_file(to, &contents)
  }

  fn make_directories(&self, path: &Path) -> Result<(), Error> {
    let path = normalize(path);
    let mut entries = self.write();
    let mut current = PathBuf::new();
    for component in path.components() {
      current.push(component);
      match entries.get(&current) {
        Some(Entry::File(_)) => return Err(Error::NotADirectory(current)),
        Some(Entry::Dir) => {}
        None => {
          entries.insert(current.clone(), Entry::Dir);
        }
      }
    }
    Ok(())
  }

  fn create_directory(&self, path: &Path) -> Result<(), Error> {
    let path = normalize(path);
    let mut entries = self.write();
    if path.as_os_str().is_empty() || entries.contains_key(&path) {
      return Err(Error::AlreadyExists(path));
    }
    Self::require_parent(&entries, &path)?;
    entries.insert(path, Entry::Dir);
    Ok(())
  }

  fn copy_tree(&self, from: &Path, to: &Path) -> Result<(), Error> {
    let from = normalize(from);
    let to = normalize(to);
    if !self.is_dir(&from) {
      return Err(Error::NotADirectory(from));
    }
    if self.exists(&to) {
      return Err(Error::AlreadyExists(to));
    }

    self.make_directories(&to)?;
    let mut entries = self.write();
    let copied: Vec<(PathBuf, Entry)> = entries
      .iter()
      .filter(|(path, _)| path.starts_with(&from) && **path != from)
      .filter_map(|(path, entry)| {
        path
          .strip_prefix(&from)
          .ok()
          .map(|rel| (to.join(rel), entry.clone()))
      })
      .collect();
    entries.extend(copied);
    Ok(())
  }

  fn remove_file(&self, path: &Path) -> Result<(), Error> {
    let path = normalize(path);
    let mut entries = self.write();
    match entries.get(&path) {
      Some(Entry::File(_)) => {
        entries.remove(&path);
        Ok(())
      }
      Some(Entry::Dir) => Err(Error::NotAFile(path)),
      None => Err(Error::NotFound(path)),
    }
  }

  fn remove_tree(&self, path: &Path) -> Result<(), Error> {
    let path = normalize(path);
    let mut entries = self.write();
    match entries.get(&path) {
      Some(Entry::Dir) => {}
      Some(Entry::File(_)) => return Err(Error::NotADirectory(path)),
      None => return Err(Error::NotFound(path)),
    }
    entries.retain(|key, _| !key.starts_with(&path));
    Ok(())
  }

  fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, Error> {
    let path = normalize(path);
    let entries = self.read();
    if !Self::is_dir_in(&entries, &path) {
      return Err(if entries.contains_key(&path) {
        Error::NotADirectory(path)
      } else {
        Error::NotFound(path)
      });
    }

    Ok(
      entries
        .keys()
        .filter(|key| key.parent() == Some(path.as_path()))
        .cloned()
        .collect(),
    )
  }
}
