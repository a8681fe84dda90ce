use std::io;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::FileSystem;

/// In-memory file tree for tests and embedders that never touch disk.
/// Directories materialize implicitly on write.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
  files: DashMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_files<P: Into<PathBuf>, C: Into<Vec<u8>>>(
    entries: impl IntoIterator<Item = (P, C)>,
  ) -> Self {
    let fs = Self::new();
    for (path, content) in entries {
      fs.files.insert(path.into(), content.into());
    }
    fs
  }

  pub fn file_names(&self) -> Vec<PathBuf> {
    let mut names: Vec<_> = self.files.iter().map(|entry| entry.key().clone()).collect();
    names.sort();
    names
  }
}

impl FileSystem for MemoryFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    self.files.get(path).map(|entry| entry.value().clone()).ok_or_else(|| {
      io::Error::new(io::ErrorKind::NotFound, format!("no such file: {}", path.display()))
    })
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    self.files.insert(path.to_path_buf(), content.to_vec());
    Ok(())
  }

  fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
    Ok(())
  }

  fn exists(&self, path: &Path) -> bool {
    self.files.contains_key(path)
      || self.files.iter().any(|entry| entry.key().starts_with(path))
  }
}
