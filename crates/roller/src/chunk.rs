use std::path::Path;

use async_trait::async_trait;
use roller_common::{NormalizedOutputOptions, OutputExports, RenderedModule};
use roller_error::BuildResult;
use roller_sourcemap::SourceMap;
use rustc_hash::FxHashMap;

use crate::plugin::{PluginContext, PluginDriver};

/// Resolved addon text applied around every chunk of one generate call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Addons {
  pub banner: String,
  pub footer: String,
  pub intro: String,
  pub outro: String,
}

impl Addons {
  /// Byte form fed into `[hash]` so addon changes invalidate hashed names.
  pub fn hash_input(&self) -> Vec<u8> {
    let mut bytes = Vec::new();
    for part in [&self.banner, &self.footer, &self.intro, &self.outro] {
      bytes.extend_from_slice(part.as_bytes());
      bytes.push(0);
    }
    bytes
  }
}

#[derive(Debug, Clone, Default)]
pub struct RenderedChunkContent {
  pub code: String,
  pub map: Option<SourceMap>,
}

/// A unit of output code, owned by the graph. The core drives chunks
/// through the generate pipeline without looking inside them: exports are
/// arranged, the chunk is pre-rendered, named exactly once per generate
/// call, then rendered to code and an optional map.
#[async_trait]
pub trait Chunk: Send + Sync {
  fn is_entry(&self) -> bool;

  /// Whether this chunk only re-exports the interface of its entry module.
  fn is_entry_module_facade(&self) -> bool;

  fn entry_module_id(&self) -> Option<&str>;

  /// User-supplied alias for the entry, when one exists.
  fn name_hint(&self) -> Option<&str> {
    None
  }

  fn get_export_names(&self) -> Vec<String>;

  fn get_import_ids(&self) -> Vec<String> {
    Vec::new()
  }

  fn set_export_mode(&mut self, _mode: OutputExports) {}

  fn generate_internal_exports(&mut self, _options: &NormalizedOutputOptions) {}

  fn pre_render(
    &mut self,
    options: &NormalizedOutputOptions,
    input_base: &Path,
  ) -> BuildResult<()>;

  /// Stable digest of the pre-rendered content; seeds `[hash]` expansion.
  fn rendered_hash(&self) -> String;

  fn filename(&self) -> Option<&str>;

  /// Clears the filename slot at the top of a generate call so the
  /// exactly-once assignment invariant holds per call, not per build.
  fn reset_filename(&mut self);

  fn assign_filename(&mut self, filename: String);

  async fn render(
    &mut self,
    options: &NormalizedOutputOptions,
    addons: &Addons,
    driver: &PluginDriver,
    ctx: &PluginContext,
  ) -> BuildResult<RenderedChunkContent>;

  /// Per-module render statistics for the output chunk record.
  fn rendered_modules(&self) -> FxHashMap<String, RenderedModule> {
    FxHashMap::default()
  }
}
