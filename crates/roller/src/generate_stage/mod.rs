mod assign_chunk_filenames;
mod create_addons;
mod create_output;

use std::sync::Arc;

use parking_lot::RwLock;
use roller_common::{
  FilenameTemplate, NormalizedOutputOptions, Output, OutputBundle, OutputOptions,
};
use roller_error::{BuildResult, BundleError, ErrorCode};
use roller_utils::commondir::longest_common_dir;

use crate::bundler_options::NormalizedInputOptions;
use crate::chunk::Chunk;
use crate::graph::Graph;
use crate::plugin::OngenerateArgs;
use crate::utils::chunk::determine_export_mode::determine_export_mode;
use crate::utils::chunk::validate_output::validate_options_for_chunk_count;
use crate::utils::normalize_options::normalize_output_options;
use crate::utils::timers::Timers;

pub(crate) use assign_chunk_filenames::assign_chunk_filenames;
pub(crate) use create_addons::create_addons;
pub(crate) use create_output::create_output;

/// One generate call over the chunks a build produced. Everything decided
/// here is per-call state; the only cross-call effect is the chunk
/// optimization latch, which fires at most once per build.
pub(crate) struct GenerateStage<'a> {
  pub graph: &'a Graph,
  pub input_options: &'a NormalizedInputOptions,
  pub chunks: &'a mut Vec<Box<dyn Chunk>>,
  pub optimized: &'a mut bool,
  pub timers: &'a mut Timers,
}

impl GenerateStage<'_> {
  pub async fn generate(
    self,
    raw_output: &OutputOptions,
    is_write: bool,
  ) -> BuildResult<(OutputBundle, NormalizedOutputOptions)> {
    let Self { graph, input_options, chunks, optimized, timers } = self;

    let options = normalize_output_options(input_options, raw_output)?;
    validate_options_for_chunk_count(&options, chunks.len())?;
    if is_write && options.file.is_none() && options.dir.is_none() {
      return Err(BundleError::new(
        ErrorCode::MissingOutputOption,
        "You must specify \"output.file\" or \"output.dir\" for the build.",
      ));
    }

    let ctx = graph.context();
    let driver = &graph.driver;
    let mut bundle = OutputBundle::default();

    // Assets emitted during the build phase get their filenames before any
    // chunk is touched.
    let asset_template = FilenameTemplate::new(options.asset_filenames.clone());
    graph.assets.write().finalize_all(&mut bundle, &asset_template)?;

    let entry_ids: Vec<&str> = chunks.iter().filter_map(|chunk| chunk.entry_module_id()).collect();
    let input_base = longest_common_dir(&entry_ids);

    let addons = create_addons(driver, ctx, &options).await?;

    for chunk in chunks.iter_mut() {
      if !input_options.preserve_modules {
        chunk.generate_internal_exports(&options);
      }
      if chunk.is_entry_module_facade() {
        let mode = determine_export_mode(&input_options.on_warn, chunk.as_ref(), &options)?;
        chunk.set_export_mode(mode);
      }
    }

    for chunk in chunks.iter_mut() {
      chunk.pre_render(&options, &input_base)?;
    }

    if input_options.optimize_chunks && !*optimized {
      timers.start("## optimize chunks");
      graph.builder.optimize_chunks(
        chunks,
        &options,
        input_options.chunk_grouping_size,
        &input_base,
      );
      timers.stop("## optimize chunks");
      *optimized = true;
    }

    assign_chunk_filenames(chunks, input_options, &options, &addons, &mut bundle, &input_base)?;

    for chunk in chunks.iter_mut() {
      let filename =
        chunk.filename().expect("chunk was named by assign_chunk_filenames").to_string();
      let rendered = chunk.render(&options, &addons, driver, ctx).await?;

      let Some(Output::Chunk(output_chunk)) = bundle.get_mut(&filename) else {
        unreachable!("bundle holds a skeleton record for every named chunk");
      };
      output_chunk.code = rendered.code;
      output_chunk.map = rendered.map;
      output_chunk.imports = chunk.get_import_ids();
      output_chunk.exports = chunk.get_export_names();
      output_chunk.modules = chunk.rendered_modules();

      let rendered_chunk = output_chunk.clone();
      let args = OngenerateArgs { options: &options, bundle: &rendered_chunk };
      driver.ongenerate(ctx, &args, &rendered_chunk).await?;
    }

    // generateBundle sees a context whose asset operations are scoped to
    // this call; emissions here cannot leak into other outputs.
    let scoped_assets = Arc::new(RwLock::new(graph.assets.read().snapshot()));
    let scoped_ctx = ctx.scoped_to_assets(Arc::clone(&scoped_assets));
    driver.generate_bundle(&scoped_ctx, &options, &mut bundle, is_write).await?;
    scoped_assets.write().finalize_remaining(&mut bundle, &asset_template)?;

    Ok((bundle, options))
  }
}
