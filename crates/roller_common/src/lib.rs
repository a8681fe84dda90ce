mod bundler_options;
mod types;

use std::hash::BuildHasherDefault;

/// Insertion-ordered map used wherever emission order is part of the
/// contract, most importantly the [`OutputBundle`].
pub type FxIndexMap<K, V> =
  indexmap::IndexMap<K, V, BuildHasherDefault<rustc_hash::FxHasher>>;

pub use crate::bundler_options::{
  addon::AddonHook,
  amd_options::AmdOptions,
  external_option::ExternalOption,
  filename_template::{FileNameRenderOptions, FilenameTemplate},
  input_item::{InputItem, InputSpec},
  normalized_output_options::NormalizedOutputOptions,
  output_exports::OutputExports,
  output_format::OutputFormat,
  output_options::{OutputOptions, RemovedHook},
  source_map_type::SourceMapType,
};

// Internal file layout is not part of the contract, so everything is
// re-exported from the root.
pub use crate::types::{
  build_cache::{BuildCache, ModuleCacheRecord},
  output::{Output, OutputBundle},
  output_asset::OutputAsset,
  output_chunk::OutputChunk,
  rendered_module::RenderedModule,
  str_or_bytes::StrOrBytes,
  watcher::WatcherHandle,
};
