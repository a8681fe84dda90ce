use std::io;
use std::path::Path;

/// Minimal file-system surface the bundler needs: module loading on the way
/// in, bundle persistence on the way out. Object safe so builds can swap in
/// the in-memory implementation.
pub trait FileSystem: Send + Sync {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let bytes = self.read(path)?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  fn exists(&self, path: &Path) -> bool;
}
