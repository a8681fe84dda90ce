use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use roller_common::{BuildCache, NormalizedOutputOptions, WatcherHandle};
use roller_error::BuildResult;
use roller_fs::FileSystem;

use crate::bundler_options::NormalizedInputOptions;
use crate::chunk::Chunk;
use crate::plugin::{Parser, PluginContext, PluginDriver, ResolvedId};
use crate::utils::assets::{AssetRegistry, SharedAssetRegistry};

pub struct GraphBuildArgs<'a> {
  pub ctx: &'a PluginContext,
  pub driver: &'a PluginDriver,
  pub options: &'a NormalizedInputOptions,
  pub fs: &'a Arc<dyn FileSystem>,
}

/// The module-graph collaborator. Its internals (parsing, dependency
/// analysis, tree shaking, chunk assignment) are not specified here; the
/// core only requires that building yields the chunk sequence and that the
/// plugin list it consumes keeps declared order.
#[async_trait]
pub trait GraphBuilder: Send + Sync {
  async fn build(&self, args: GraphBuildArgs<'_>) -> BuildResult<Vec<Box<dyn Chunk>>>;

  /// Full resolution: the `resolveId` hook chain first, then the graph's
  /// own fallback.
  async fn resolve_id(
    &self,
    driver: &PluginDriver,
    ctx: &PluginContext,
    specifier: &str,
    importer: Option<&str>,
  ) -> BuildResult<Option<ResolvedId>>;

  /// Regroups small chunks. Identity by default; the at-most-once-per-build
  /// latch belongs to the core, not the implementation.
  fn optimize_chunks(
    &self,
    _chunks: &mut Vec<Box<dyn Chunk>>,
    _options: &NormalizedOutputOptions,
    _chunk_grouping_size: usize,
    _input_base: &Path,
  ) {
  }

  /// Serializable per-module transform state for `Build::cache`.
  fn cache(&self) -> BuildCache {
    BuildCache::default()
  }

  fn parser(&self) -> Option<Arc<dyn Parser>> {
    None
  }
}

/// Facade the build owns: the plugin driver and its context, the asset
/// registry, and the graph-builder collaborator. Plugins reach all of it
/// only through the published context API.
pub struct Graph {
  pub(crate) driver: Arc<PluginDriver>,
  pub(crate) builder: Arc<dyn GraphBuilder>,
  pub(crate) fs: Arc<dyn FileSystem>,
  pub(crate) assets: SharedAssetRegistry,
  context: PluginContext,
}

impl Graph {
  pub(crate) fn new(
    options: &NormalizedInputOptions,
    builder: Arc<dyn GraphBuilder>,
    fs: Arc<dyn FileSystem>,
    watcher: Option<WatcherHandle>,
  ) -> Self {
    let driver = Arc::new(PluginDriver::new(options.plugins.clone()));
    let assets: SharedAssetRegistry = Arc::new(RwLock::new(AssetRegistry::default()));
    let context = PluginContext {
      driver: Arc::clone(&driver),
      builder: Arc::clone(&builder),
      assets: Arc::clone(&assets),
      on_warn: Arc::clone(&options.on_warn),
      external: options.external.clone(),
      watcher,
      parser: builder.parser(),
    };
    Self { driver, builder, fs, assets, context }
  }

  pub(crate) fn context(&self) -> &PluginContext {
    &self.context
  }

  pub(crate) async fn build(
    &self,
    options: &NormalizedInputOptions,
  ) -> BuildResult<Vec<Box<dyn Chunk>>> {
    let args = GraphBuildArgs {
      ctx: &self.context,
      driver: &self.driver,
      options,
      fs: &self.fs,
    };
    self.builder.build(args).await
  }

  pub fn get_cache(&self) -> BuildCache {
    self.builder.cache()
  }
}
