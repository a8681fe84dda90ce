use arcstr::ArcStr;

use crate::StrOrBytes;

#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: ArcStr,
  pub source: StrOrBytes,
}

impl OutputAsset {
  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn source_as_bytes(&self) -> &[u8] {
    self.source.as_bytes()
  }
}
