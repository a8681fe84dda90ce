use std::fmt;

/// Target module format of an output. `[format]` placeholders expand to the
/// canonical short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
  Esm,
  Cjs,
  Amd,
  System,
  Iife,
  Umd,
}

impl OutputFormat {
  /// Accepts the user-facing spellings. `"es6"` is recognized upstream by
  /// the normalizer and rejected with a dedicated error before this runs.
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "es" | "esm" | "module" => Some(Self::Esm),
      "cjs" | "commonjs" => Some(Self::Cjs),
      "amd" => Some(Self::Amd),
      "system" | "systemjs" => Some(Self::System),
      "iife" => Some(Self::Iife),
      "umd" => Some(Self::Umd),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Esm => "es",
      Self::Cjs => "cjs",
      Self::Amd => "amd",
      Self::System => "system",
      Self::Iife => "iife",
      Self::Umd => "umd",
    }
  }

  /// Formats that can only represent a single chunk.
  pub fn is_single_chunk_only(&self) -> bool {
    matches!(self, Self::Iife | Self::Umd)
  }
}

impl fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[test]
fn test_parse_spellings() {
  assert_eq!(OutputFormat::parse("esm"), Some(OutputFormat::Esm));
  assert_eq!(OutputFormat::parse("commonjs"), Some(OutputFormat::Cjs));
  assert_eq!(OutputFormat::parse("systemjs"), Some(OutputFormat::System));
  assert_eq!(OutputFormat::parse("es6"), None);
}
