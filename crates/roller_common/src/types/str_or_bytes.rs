/// Asset payloads are either text or raw bytes; both end up on disk as
/// bytes, but hooks that emitted text get text back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOrBytes {
  Str(String),
  Bytes(Vec<u8>),
}

impl StrOrBytes {
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::Str(text) => text.as_bytes(),
      Self::Bytes(bytes) => bytes,
    }
  }

  pub fn into_bytes(self) -> Vec<u8> {
    match self {
      Self::Str(text) => text.into_bytes(),
      Self::Bytes(bytes) => bytes,
    }
  }
}

impl From<String> for StrOrBytes {
  fn from(text: String) -> Self {
    Self::Str(text)
  }
}

impl From<&str> for StrOrBytes {
  fn from(text: &str) -> Self {
    Self::Str(text.to_string())
  }
}

impl From<Vec<u8>> for StrOrBytes {
  fn from(bytes: Vec<u8>) -> Self {
    Self::Bytes(bytes)
  }
}
