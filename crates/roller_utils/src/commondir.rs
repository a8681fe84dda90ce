use std::path::{Path, PathBuf};

/// Longest common directory of a set of module ids, the anchor for `[name]`
/// expansion. A single id anchors at its parent directory. Comparison is by
/// whole path components so `/a/foo.js` and `/a/foobar/x.js` share `/a`,
/// never `/a/foo`.
pub fn longest_common_dir<P: AsRef<Path>>(ids: &[P]) -> PathBuf {
  let mut dirs = ids.iter().map(|id| id.as_ref().parent().unwrap_or_else(|| Path::new("")));

  let Some(first) = dirs.next() else {
    return PathBuf::new();
  };

  let mut common: Vec<_> = first.components().collect();
  for dir in dirs {
    let shared = common.iter().zip(dir.components()).take_while(|(a, b)| **a == *b).count();
    common.truncate(shared);
  }
  common.iter().collect()
}
