use crate::{FxIndexMap, OutputAsset, OutputChunk};

/// One entry of a generated bundle.
#[derive(Debug, Clone)]
pub enum Output {
  Chunk(OutputChunk),
  Asset(OutputAsset),
}

impl Output {
  pub fn filename(&self) -> &str {
    match self {
      Self::Chunk(chunk) => chunk.filename(),
      Self::Asset(asset) => asset.filename(),
    }
  }

  pub fn as_chunk(&self) -> Option<&OutputChunk> {
    match self {
      Self::Chunk(chunk) => Some(chunk),
      Self::Asset(_) => None,
    }
  }

  pub fn as_asset(&self) -> Option<&OutputAsset> {
    match self {
      Self::Asset(asset) => Some(asset),
      Self::Chunk(_) => None,
    }
  }
}

/// Bundle under construction during a generate call: final filename →
/// output, in emission order.
pub type OutputBundle = FxIndexMap<String, Output>;
