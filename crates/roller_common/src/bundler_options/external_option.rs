use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

pub type ExternalPredicate = Arc<dyn Fn(&str, Option<&str>, bool) -> bool + Send + Sync>;

/// External-module policy: an explicit id set, or a predicate over
/// `(id, importer, is_resolved)`.
#[derive(Clone)]
pub enum ExternalOption {
  Ids(FxHashSet<String>),
  Predicate(ExternalPredicate),
}

impl ExternalOption {
  pub fn is_external(&self, id: &str, importer: Option<&str>, is_resolved: bool) -> bool {
    match self {
      Self::Ids(ids) => ids.contains(id),
      Self::Predicate(predicate) => predicate(id, importer, is_resolved),
    }
  }
}

impl Default for ExternalOption {
  fn default() -> Self {
    Self::Ids(FxHashSet::default())
  }
}

impl<S: Into<String>> FromIterator<S> for ExternalOption {
  fn from_iter<T: IntoIterator<Item = S>>(ids: T) -> Self {
    Self::Ids(ids.into_iter().map(Into::into).collect())
  }
}

impl fmt::Debug for ExternalOption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Ids(ids) => f.debug_tuple("Ids").field(ids).finish(),
      Self::Predicate(_) => f.write_str("Predicate(..)"),
    }
  }
}
