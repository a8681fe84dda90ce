use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

pub type AddonThunk = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<String>> + Send + Sync>;

/// A `banner`/`footer`/`intro`/`outro` contribution: either a literal or a
/// deferred thunk. Both resolve through the same call so the driver treats
/// every addon as a zero-argument async provider.
#[derive(Clone)]
pub enum AddonHook {
  Literal(String),
  Thunk(AddonThunk),
}

impl AddonHook {
  pub async fn resolve(&self) -> anyhow::Result<String> {
    match self {
      Self::Literal(text) => Ok(text.clone()),
      Self::Thunk(thunk) => thunk().await,
    }
  }
}

impl From<&str> for AddonHook {
  fn from(text: &str) -> Self {
    Self::Literal(text.to_string())
  }
}

impl From<String> for AddonHook {
  fn from(text: String) -> Self {
    Self::Literal(text)
  }
}

impl fmt::Debug for AddonHook {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
      Self::Thunk(_) => f.write_str("Thunk(..)"),
    }
  }
}
