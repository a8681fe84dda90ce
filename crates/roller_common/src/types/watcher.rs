use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

/// Handle to the enclosing watch reactor. One-shot builds have none. The
/// core never drives the reactor; it only records the files a build
/// depends on so the reactor can schedule re-runs.
#[derive(Debug, Clone, Default)]
pub struct WatcherHandle {
  watched: Arc<Mutex<Vec<PathBuf>>>,
}

impl WatcherHandle {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_watch_file(&self, path: impl Into<PathBuf>) {
    self.watched.lock().push(path.into());
  }

  pub fn watch_files(&self) -> Vec<PathBuf> {
    self.watched.lock().clone()
  }
}
