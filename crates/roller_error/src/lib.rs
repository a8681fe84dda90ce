use std::fmt;
use std::sync::Arc;

use thiserror::Error;

pub type BuildResult<T> = Result<T, BundleError>;

/// Closed set of failure codes surfaced on [`BundleError`]. Codes stay
/// stable across releases so callers can match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
  UnknownOption,
  InvalidOption,
  MissingOption,
  DeprecatedOptions,
  MissingOutputOption,
  UnsupportedLegacyOption,
  FormatRequired,
  FormatDeprecated,
  ConflictingOption,
  AssetFinalized,
  UnknownAsset,
  AssetSourceMissing,
  PluginError,
}

impl ErrorCode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::UnknownOption => "UNKNOWN_OPTION",
      Self::InvalidOption => "INVALID_OPTION",
      Self::MissingOption => "MISSING_OPTION",
      Self::DeprecatedOptions => "DEPRECATED_OPTIONS",
      Self::MissingOutputOption => "MISSING_OUTPUT_OPTION",
      Self::UnsupportedLegacyOption => "UNSUPPORTED_LEGACY_OPTION",
      Self::FormatRequired => "FORMAT_REQUIRED",
      Self::FormatDeprecated => "FORMAT_DEPRECATED",
      Self::ConflictingOption => "CONFLICTING_OPTION",
      Self::AssetFinalized => "ASSET_FINALIZED",
      Self::UnknownAsset => "UNKNOWN_ASSET",
      Self::AssetSourceMissing => "ASSET_SOURCE_MISSING",
      Self::PluginError => "PLUGIN_ERROR",
    }
  }
}

impl fmt::Display for ErrorCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Line/column location attached to errors and warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locus {
  pub file: Option<String>,
  pub line: u32,
  pub column: u32,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct BundleError {
  pub code: Option<ErrorCode>,
  pub message: String,
  pub url: Option<String>,
  pub plugin: Option<String>,
  pub pos: Option<u32>,
  pub loc: Option<Locus>,
  pub frame: Option<String>,
  #[source]
  pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BundleError {
  pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
    Self {
      code: Some(code),
      message: message.into(),
      url: None,
      plugin: None,
      pos: None,
      loc: None,
      frame: None,
      cause: None,
    }
  }

  pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
    self.plugin = Some(plugin.into());
    self
  }

  pub fn with_pos(mut self, pos: u32) -> Self {
    self.pos = Some(pos);
    self
  }

  pub fn with_url(mut self, url: impl Into<String>) -> Self {
    self.url = Some(url.into());
    self
  }

  /// Wraps a value thrown by a plugin hook. A [`BundleError`] raised through
  /// the plugin context keeps its own code and position; anything else is
  /// folded into a `PLUGIN_ERROR`. The plugin name is attached either way
  /// unless the error already carries one.
  pub fn from_plugin(plugin: &str, cause: anyhow::Error) -> Self {
    match cause.downcast::<BundleError>() {
      Ok(mut err) => {
        if err.plugin.is_none() {
          err.plugin = Some(plugin.to_string());
        }
        err
      }
      Err(cause) => Self {
        code: Some(ErrorCode::PluginError),
        message: cause.to_string(),
        url: None,
        plugin: Some(plugin.to_string()),
        pos: None,
        loc: None,
        frame: None,
        cause: Some(cause.into()),
      },
    }
  }

  pub fn code_str(&self) -> Option<&'static str> {
    self.code.map(|code| code.as_str())
  }
}

impl From<anyhow::Error> for BundleError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<BundleError>() {
      Ok(err) => err,
      Err(err) => Self {
        code: None,
        message: err.to_string(),
        url: None,
        plugin: None,
        pos: None,
        loc: None,
        frame: None,
        cause: Some(err.into()),
      },
    }
  }
}

impl From<std::io::Error> for BundleError {
  fn from(err: std::io::Error) -> Self {
    Self {
      code: None,
      message: err.to_string(),
      url: None,
      plugin: None,
      pos: None,
      loc: None,
      frame: None,
      cause: Some(Box::new(err)),
    }
  }
}

/// Non-fatal diagnostic routed to the user warning sink.
#[derive(Debug, Clone)]
pub struct Warning {
  pub code: Option<String>,
  pub message: String,
  pub plugin: Option<String>,
  pub pos: Option<u32>,
  pub loc: Option<Locus>,
  pub frame: Option<String>,
}

impl Warning {
  pub fn new(message: impl Into<String>) -> Self {
    Self { code: None, message: message.into(), plugin: None, pos: None, loc: None, frame: None }
  }

  pub fn with_code(mut self, code: impl Into<String>) -> Self {
    self.code = Some(code.into());
    self
  }
}

impl From<&str> for Warning {
  fn from(message: &str) -> Self {
    Self::new(message)
  }
}

impl From<String> for Warning {
  fn from(message: String) -> Self {
    Self::new(message)
  }
}

pub type WarningHandler = Arc<dyn Fn(Warning) + Send + Sync>;
