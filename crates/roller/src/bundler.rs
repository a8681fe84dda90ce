use std::sync::Arc;

use roller_common::{BuildCache, NormalizedOutputOptions, Output, OutputBundle, OutputOptions};
use roller_error::BuildResult;
use roller_fs::{FileSystem, OsFileSystem};

use crate::bundler_options::{InputOptions, NormalizedInputOptions};
use crate::chunk::Chunk;
use crate::generate_stage::{create_output, GenerateStage};
use crate::graph::{Graph, GraphBuilder};
use crate::module_graph::FlatGraphBuilder;
use crate::utils::normalize_options::normalize_input_options;
use crate::utils::timers::{SerializedTimings, Timers, TIMER_BUILD, TIMER_GENERATE};
use crate::write_bundle::write_bundle;

/// Result of one `generate`/`write` call: entry chunks first, then shared
/// chunks, then assets.
#[derive(Debug)]
pub struct BundleOutput {
  pub output: Vec<Output>,
}

/// Runs the build phase over the default collaborators: the flat built-in
/// graph and the real file system.
pub async fn rollup(options: InputOptions) -> BuildResult<Build> {
  rollup_with(options, Arc::new(FlatGraphBuilder::default()), Arc::new(OsFileSystem)).await
}

/// Runs the build phase with an injected graph collaborator and file
/// system. The returned handle generates and writes outputs any number of
/// times without rebuilding.
pub async fn rollup_with(
  raw_options: InputOptions,
  builder: Arc<dyn GraphBuilder>,
  fs: Arc<dyn FileSystem>,
) -> BuildResult<Build> {
  let mut options = normalize_input_options(raw_options).await?;
  let mut timers = Timers::new(options.perf);

  // The watcher slot is taken here so it cannot be consumed twice.
  let watcher = options.watcher.take();
  let graph = Graph::new(&options, builder, fs, watcher);

  timers.start(TIMER_BUILD);
  tracing::debug!(entries = options.input.len(), "build start");
  let chunks = build_chunks(&graph, &options).await?;
  tracing::debug!(chunks = chunks.len(), "build end");
  timers.stop(TIMER_BUILD);

  Ok(Build { graph, options, chunks, optimized: false, timers })
}

/// Graph construction framed by the `buildStart`/`buildEnd` pair. Whatever
/// fails in between, `buildEnd` still runs with the failure value, and the
/// original failure wins over anything `buildEnd` itself raises.
async fn build_chunks(
  graph: &Graph,
  options: &NormalizedInputOptions,
) -> BuildResult<Vec<Box<dyn Chunk>>> {
  let ctx = graph.context();

  if let Err(err) = graph.driver.build_start(ctx, options).await {
    let _ = graph.driver.build_end(ctx, Some(&err)).await;
    return Err(err);
  }

  match graph.build(options).await {
    Ok(chunks) => {
      graph.driver.build_end(ctx, None).await?;
      Ok(chunks)
    }
    Err(err) => {
      let _ = graph.driver.build_end(ctx, Some(&err)).await;
      Err(err)
    }
  }
}

/// A finished build: the graph's chunk sequence plus everything needed to
/// run the generate phase per output configuration.
pub struct Build {
  graph: Graph,
  options: NormalizedInputOptions,
  chunks: Vec<Box<dyn Chunk>>,
  optimized: bool,
  timers: Timers,
}

impl std::fmt::Debug for Build {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Build").finish_non_exhaustive()
  }
}

impl Build {
  pub async fn generate(&mut self, output: OutputOptions) -> BuildResult<BundleOutput> {
    let (bundle, _) = self.run_generate(&output, false).await?;
    Ok(BundleOutput { output: create_output(bundle) })
  }

  pub async fn write(&mut self, output: OutputOptions) -> BuildResult<BundleOutput> {
    let (bundle, out_options) = self.run_generate(&output, true).await?;
    write_bundle(&self.graph, &out_options, &bundle).await?;
    Ok(BundleOutput { output: create_output(bundle) })
  }

  async fn run_generate(
    &mut self,
    output: &OutputOptions,
    is_write: bool,
  ) -> BuildResult<(OutputBundle, NormalizedOutputOptions)> {
    self.timers.start(TIMER_GENERATE);
    let stage = GenerateStage {
      graph: &self.graph,
      input_options: &self.options,
      chunks: &mut self.chunks,
      optimized: &mut self.optimized,
      timers: &mut self.timers,
    };
    let result = stage.generate(output, is_write).await;
    self.timers.stop(TIMER_GENERATE);
    result
  }

  /// Serializable snapshot of per-module transform state; inject it back
  /// through `input.cache` to reuse it.
  pub fn cache(&self) -> BuildCache {
    self.graph.get_cache()
  }

  /// Phase timings, present when the build ran with `perf: true`.
  pub fn timings(&self) -> Option<SerializedTimings> {
    self.timers.serialized()
  }
}
