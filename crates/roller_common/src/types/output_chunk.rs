use arcstr::ArcStr;
use roller_sourcemap::SourceMap;
use rustc_hash::FxHashMap;

use crate::RenderedModule;

#[derive(Debug, Clone, Default)]
pub struct OutputChunk {
  pub filename: ArcStr,
  pub code: String,
  pub map: Option<SourceMap>,
  pub is_entry: bool,
  pub facade_module_id: Option<String>,
  pub imports: Vec<String>,
  pub exports: Vec<String>,
  pub modules: FxHashMap<String, RenderedModule>,
}

impl OutputChunk {
  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn code_as_bytes(&self) -> &[u8] {
    self.code.as_bytes()
  }
}
