use base64::prelude::{Engine, BASE64_STANDARD};
use serde::{Deserialize, Serialize};

/// Version-3 source map in its serialized shape. Composition of mappings is
/// the renderer's business; the core only carries maps through to output
/// files and URL comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
  pub version: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file: Option<String>,
  pub sources: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sources_content: Option<Vec<Option<String>>>,
  pub names: Vec<String>,
  pub mappings: String,
}

impl SourceMap {
  pub fn new(sources: Vec<String>, mappings: String) -> Self {
    Self { version: 3, file: None, sources, sources_content: None, names: Vec::new(), mappings }
  }

  pub fn with_file(mut self, file: impl Into<String>) -> Self {
    self.file = Some(file.into());
    self
  }

  pub fn to_json_string(&self) -> String {
    serde_json::to_string(self).expect("source map serialization cannot fail")
  }

  /// `data:` URL form used by inline source-map comments.
  pub fn to_url(&self) -> String {
    let encoded = BASE64_STANDARD.encode(self.to_json_string());
    format!("data:application/json;charset=utf-8;base64,{encoded}")
  }
}

/// Trailing comment pointing at an external companion map file.
pub fn sourcemap_url_comment(map_file_name: &str) -> String {
  format!("//# sourceMappingURL={map_file_name}\n")
}

/// Trailing comment embedding the whole map.
pub fn sourcemap_inline_comment(map: &SourceMap) -> String {
  format!("//# sourceMappingURL={}\n", map.to_url())
}
