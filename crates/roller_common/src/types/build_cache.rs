use serde::{Deserialize, Serialize};

/// Serializable snapshot of per-module transform state. A later build may
/// inject it back through `input.cache` to skip unchanged work; the core
/// only carries it between the graph and the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCache {
  pub modules: Vec<ModuleCacheRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCacheRecord {
  pub id: String,
  pub original_code: Option<String>,
  pub code: String,
  pub dependencies: Vec<String>,
}

impl BuildCache {
  pub fn module(&self, id: &str) -> Option<&ModuleCacheRecord> {
    self.modules.iter().find(|record| record.id == id)
  }
}
