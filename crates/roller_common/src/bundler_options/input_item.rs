use crate::FxIndexMap;

/// Entry specifiers as supplied by the user: a single path, an ordered list,
/// or an alias → path mapping.
#[derive(Debug, Clone)]
pub enum InputSpec {
  Single(String),
  Paths(Vec<String>),
  Named(FxIndexMap<String, String>),
}

impl From<&str> for InputSpec {
  fn from(path: &str) -> Self {
    Self::Single(path.to_string())
  }
}

impl From<String> for InputSpec {
  fn from(path: String) -> Self {
    Self::Single(path)
  }
}

impl From<Vec<String>> for InputSpec {
  fn from(paths: Vec<String>) -> Self {
    Self::Paths(paths)
  }
}

impl From<Vec<&str>> for InputSpec {
  fn from(paths: Vec<&str>) -> Self {
    Self::Paths(paths.into_iter().map(str::to_string).collect())
  }
}

/// One normalized entry: the import path plus the user alias, when the entry
/// came from a named mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
  pub name: Option<String>,
  pub import: String,
}

impl InputSpec {
  pub fn into_items(self) -> Vec<InputItem> {
    match self {
      Self::Single(path) => vec![InputItem { name: None, import: path }],
      Self::Paths(paths) => {
        paths.into_iter().map(|import| InputItem { name: None, import }).collect()
      }
      Self::Named(aliases) => aliases
        .into_iter()
        .map(|(name, import)| InputItem { name: Some(name), import })
        .collect(),
    }
  }
}
