use rustc_hash::FxHashMap;

use crate::{AddonHook, AmdOptions, OutputExports, OutputFormat, SourceMapType};

/// Output configuration after merging and validation. Immutable for the
/// duration of one generate call.
#[derive(Debug, Clone)]
pub struct NormalizedOutputOptions {
  pub format: OutputFormat,
  pub file: Option<String>,
  pub dir: Option<String>,
  pub name: Option<String>,
  pub globals: FxHashMap<String, String>,
  pub entry_filenames: String,
  pub chunk_filenames: String,
  pub asset_filenames: String,
  pub sourcemap: Option<SourceMapType>,
  pub sourcemap_file: Option<String>,
  pub exports: OutputExports,
  pub amd: AmdOptions,

  pub banner: Option<AddonHook>,
  pub footer: Option<AddonHook>,
  pub intro: Option<AddonHook>,
  pub outro: Option<AddonHook>,

  pub compact: bool,
  pub indent: bool,
  pub strict: bool,
  pub freeze: bool,
  pub es_module: bool,
  pub namespace_to_string_tag: bool,
  pub interop: bool,
  pub extend: bool,
}

impl NormalizedOutputOptions {
  /// Directory output files land in; `file` outputs resolve to the parent
  /// of the target path.
  pub fn output_dir(&self) -> &str {
    if let Some(file) = &self.file {
      let end = file.rfind('/').unwrap_or(0);
      &file[..end]
    } else {
      self.dir.as_deref().unwrap_or("")
    }
  }
}
