use std::sync::Arc;

use futures::future::join_all;
use roller_common::{NormalizedOutputOptions, OutputBundle, OutputChunk};
use roller_error::{BuildResult, BundleError};

use crate::bundler_options::NormalizedInputOptions;
use crate::plugin::{LoadOutput, OngenerateArgs, OnwriteArgs, Plugin, PluginContext, ResolvedId};

/// Schedules plugin hooks with the invocation shape each hook demands:
/// parallel fan-out, first-non-absent, or a sequential pipeline. Failures
/// are wrapped so they carry the offending plugin's name.
pub struct PluginDriver {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginDriver {
  pub fn new(plugins: Vec<Arc<dyn Plugin>>) -> Self {
    Self { plugins }
  }

  pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
    &self.plugins
  }

  /// First failure in declared order, after every sibling has settled.
  fn first_error(results: Vec<BuildResult<()>>) -> BuildResult<()> {
    results.into_iter().find_map(Result::err).map_or(Ok(()), Err)
  }

  pub async fn build_start(
    &self,
    ctx: &PluginContext,
    options: &NormalizedInputOptions,
  ) -> BuildResult<()> {
    let results = join_all(self.plugins.iter().map(|plugin| async move {
      plugin
        .build_start(ctx, options)
        .await
        .map_err(|err| BundleError::from_plugin(&plugin.name(), err))
    }))
    .await;
    Self::first_error(results)
  }

  pub async fn build_end(
    &self,
    ctx: &PluginContext,
    error: Option<&BundleError>,
  ) -> BuildResult<()> {
    let results = join_all(self.plugins.iter().map(|plugin| async move {
      plugin
        .build_end(ctx, error)
        .await
        .map_err(|err| BundleError::from_plugin(&plugin.name(), err))
    }))
    .await;
    Self::first_error(results)
  }

  pub async fn resolve_id(
    &self,
    ctx: &PluginContext,
    specifier: &str,
    importer: Option<&str>,
  ) -> BuildResult<Option<ResolvedId>> {
    for plugin in &self.plugins {
      match plugin.resolve_id(ctx, specifier, importer).await {
        Ok(Some(resolved)) => return Ok(Some(resolved)),
        Ok(None) => {}
        Err(err) => return Err(BundleError::from_plugin(&plugin.name(), err)),
      }
    }
    Ok(None)
  }

  pub async fn resolve_dynamic_import(
    &self,
    ctx: &PluginContext,
    specifier: &str,
    importer: &str,
  ) -> BuildResult<Option<ResolvedId>> {
    for plugin in &self.plugins {
      match plugin.resolve_dynamic_import(ctx, specifier, importer).await {
        Ok(Some(resolved)) => return Ok(Some(resolved)),
        Ok(None) => {}
        Err(err) => return Err(BundleError::from_plugin(&plugin.name(), err)),
      }
    }
    Ok(None)
  }

  pub async fn load(&self, ctx: &PluginContext, id: &str) -> BuildResult<Option<LoadOutput>> {
    for plugin in &self.plugins {
      match plugin.load(ctx, id).await {
        Ok(Some(output)) => return Ok(Some(output)),
        Ok(None) => {}
        Err(err) => return Err(BundleError::from_plugin(&plugin.name(), err)),
      }
    }
    Ok(None)
  }

  /// Sequential pipeline: each plugin's output feeds the next one.
  pub async fn transform(
    &self,
    ctx: &PluginContext,
    mut code: String,
    id: &str,
  ) -> BuildResult<String> {
    for plugin in &self.plugins {
      let transformed = plugin
        .transform(ctx, &code, id)
        .await
        .map_err(|err| BundleError::from_plugin(&plugin.name(), err))?;
      if let Some(output) = transformed {
        code = output.code;
      }
    }
    Ok(code)
  }

  /// Pipeline over the rendered chunk code. The deprecated
  /// `transform_bundle` hook is consulted whenever `transform_chunk`
  /// passes the code through untouched.
  pub async fn transform_chunk(
    &self,
    ctx: &PluginContext,
    mut code: String,
    options: &NormalizedOutputOptions,
  ) -> BuildResult<String> {
    for plugin in &self.plugins {
      let transformed = match plugin
        .transform_chunk(ctx, &code, options)
        .await
        .map_err(|err| BundleError::from_plugin(&plugin.name(), err))?
      {
        Some(output) => Some(output),
        None => plugin
          .transform_bundle(ctx, &code, options)
          .await
          .map_err(|err| BundleError::from_plugin(&plugin.name(), err))?,
      };
      if let Some(output) = transformed {
        code = output.code;
      }
    }
    Ok(code)
  }

  /// Hooks mutate the shared bundle, so invocations are serialized on this
  /// task; every hook still runs, and the first failure in declared order
  /// is surfaced only after all have settled.
  pub async fn generate_bundle(
    &self,
    ctx: &PluginContext,
    options: &NormalizedOutputOptions,
    bundle: &mut OutputBundle,
    is_write: bool,
  ) -> BuildResult<()> {
    let mut first_error = None;
    for plugin in &self.plugins {
      if let Err(err) = plugin.generate_bundle(ctx, options, bundle, is_write).await {
        let err = BundleError::from_plugin(&plugin.name(), err);
        first_error.get_or_insert(err);
      }
    }
    first_error.map_or(Ok(()), Err)
  }

  pub async fn ongenerate(
    &self,
    ctx: &PluginContext,
    args: &OngenerateArgs<'_>,
    chunk: &OutputChunk,
  ) -> BuildResult<()> {
    let results = join_all(self.plugins.iter().map(|plugin| async move {
      plugin
        .ongenerate(ctx, args, chunk)
        .await
        .map_err(|err| BundleError::from_plugin(&plugin.name(), err))
    }))
    .await;
    Self::first_error(results)
  }

  pub async fn onwrite(
    &self,
    ctx: &PluginContext,
    args: &OnwriteArgs<'_>,
    chunk: &OutputChunk,
  ) -> BuildResult<()> {
    let results = join_all(self.plugins.iter().map(|plugin| async move {
      plugin
        .onwrite(ctx, args, chunk)
        .await
        .map_err(|err| BundleError::from_plugin(&plugin.name(), err))
    }))
    .await;
    Self::first_error(results)
  }
}
