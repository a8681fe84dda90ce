mod bundler;
mod bundler_options;
mod chunk;
mod generate_stage;
mod graph;
mod module_graph;
mod plugin;
mod utils;
mod write_bundle;

pub use crate::bundler::{rollup, rollup_with, Build, BundleOutput};
pub use crate::bundler_options::{InputOptions, NormalizedInputOptions};
pub use crate::chunk::{Addons, Chunk, RenderedChunkContent};
pub use crate::graph::{Graph, GraphBuildArgs, GraphBuilder};
pub use crate::module_graph::{EntryChunk, FlatGraphBuilder};
pub use crate::plugin::{
  HookAddonReturn, HookLoadReturn, HookNoopReturn, HookResolveIdReturn, HookTransformReturn,
  LoadOutput, OngenerateArgs, OnwriteArgs, Parser, Plugin, PluginContext, PluginDriver,
  ResolvedId, TransformOutput,
};
pub use crate::utils::assets::{AssetRegistry, EmittedAsset, SharedAssetRegistry};
pub use crate::utils::normalize_options::{normalize_input_options, normalize_output_options};
pub use crate::utils::timers::SerializedTimings;

pub use roller_common::*;
pub use roller_error::{BuildResult, BundleError, ErrorCode, Locus, Warning, WarningHandler};
pub use roller_sourcemap::SourceMap;
