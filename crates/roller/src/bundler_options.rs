use std::sync::Arc;

use roller_common::{
  BuildCache, ExternalOption, InputItem, InputSpec, OutputOptions, RemovedHook, WatcherHandle,
};
use roller_error::WarningHandler;
use rustc_hash::FxHashMap;

use crate::plugin::Plugin;

/// The loosely-typed configuration `rollup` consumes. Every field is
/// optional; plugins' `options` hooks fold over this struct before the
/// normalizer freezes it.
#[derive(Clone, Default)]
pub struct InputOptions {
  pub input: Option<InputSpec>,
  pub plugins: Vec<Arc<dyn Plugin>>,
  pub external: Option<ExternalOption>,
  pub treeshake: Option<bool>,
  pub cache: Option<BuildCache>,
  /// Top-level `this` value modules are evaluated with.
  pub context: Option<String>,
  pub manual_chunks: Option<FxHashMap<String, Vec<String>>>,
  pub preserve_modules: Option<bool>,
  pub inline_dynamic_imports: Option<bool>,
  pub optimize_chunks: Option<bool>,
  pub chunk_grouping_size: Option<usize>,
  pub prefer_const: Option<bool>,
  pub perf: Option<bool>,
  pub shim_missing_exports: Option<bool>,
  pub onwarn: Option<WarningHandler>,
  pub watcher: Option<WatcherHandle>,
  /// Config-level output defaults; per-generate options override these.
  pub output: Option<OutputOptions>,

  /// Renamed to `input`; rewritten with a DEPRECATED_OPTIONS warning.
  pub entry: Option<String>,

  // Hooks rollup used to accept at the top level. They belong to plugins
  // now; any of them present fails normalization.
  pub transform: Option<RemovedHook>,
  pub load: Option<RemovedHook>,
  pub resolve_id: Option<RemovedHook>,
  pub resolve_external: Option<RemovedHook>,
}

/// Input configuration after the `options` hook fold, deprecation rewrites,
/// and validation. Immutable for the lifetime of the build, except for the
/// watcher slot which the build coordinator takes exactly once.
#[derive(Clone)]
pub struct NormalizedInputOptions {
  pub input: Vec<InputItem>,
  pub plugins: Vec<Arc<dyn Plugin>>,
  pub external: ExternalOption,
  pub treeshake: bool,
  pub cache: Option<BuildCache>,
  pub context: String,
  pub manual_chunks: Option<FxHashMap<String, Vec<String>>>,
  pub preserve_modules: bool,
  pub inline_dynamic_imports: bool,
  pub optimize_chunks: bool,
  pub chunk_grouping_size: usize,
  pub prefer_const: bool,
  pub perf: bool,
  pub shim_missing_exports: bool,
  pub on_warn: WarningHandler,
  pub watcher: Option<WatcherHandle>,
  pub output: OutputOptions,
}

impl std::fmt::Debug for NormalizedInputOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NormalizedInputOptions").finish_non_exhaustive()
  }
}
