use rustc_hash::FxHashMap;

use crate::{AddonHook, AmdOptions, SourceMapType};

/// Marker for option slots rollup used to accept and no longer does. The
/// value itself is gone; its presence lets the normalizer reject old
/// configurations with a pointed error instead of ignoring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedHook;

/// Per-generate output configuration as supplied by the user. Everything is
/// optional; the normalizer fills defaults and rejects conflicts. `format`
/// and `exports` arrive as strings so legacy spellings can be diagnosed.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
  pub format: Option<String>,
  pub file: Option<String>,
  pub dir: Option<String>,
  pub name: Option<String>,
  pub globals: Option<FxHashMap<String, String>>,
  pub entry_filenames: Option<String>,
  pub chunk_filenames: Option<String>,
  pub asset_filenames: Option<String>,
  pub sourcemap: Option<SourceMapType>,
  pub sourcemap_file: Option<String>,
  pub exports: Option<String>,
  pub amd: Option<AmdOptions>,

  pub banner: Option<AddonHook>,
  pub footer: Option<AddonHook>,
  pub intro: Option<AddonHook>,
  pub outro: Option<AddonHook>,

  pub compact: Option<bool>,
  pub indent: Option<bool>,
  pub strict: Option<bool>,
  pub freeze: Option<bool>,
  pub es_module: Option<bool>,
  pub namespace_to_string_tag: Option<bool>,
  pub interop: Option<bool>,
  pub extend: Option<bool>,

  // Renamed options, rewritten by the normalizer with a
  // DEPRECATED_OPTIONS warning.
  pub dest: Option<String>,
  pub module_name: Option<String>,
  pub module_id: Option<String>,
}

impl OutputOptions {
  /// Fills unset slots from `fallback`, the merge step behind the
  /// `.output` > top-level > input-level precedence chain.
  pub fn merged_over(mut self, fallback: &OutputOptions) -> OutputOptions {
    macro_rules! inherit {
      ($($field:ident),+ $(,)?) => {
        $(if self.$field.is_none() {
          self.$field = fallback.$field.clone();
        })+
      };
    }
    inherit!(
      format, file, dir, name, globals, entry_filenames, chunk_filenames, asset_filenames,
      sourcemap, sourcemap_file, exports, amd, banner, footer, intro, outro, compact, indent,
      strict, freeze, es_module, namespace_to_string_tag, interop, extend, dest, module_name,
      module_id,
    );
    self
  }
}
