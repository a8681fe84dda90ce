pub mod plugin_context;
pub mod plugin_driver;

use std::borrow::Cow;

use async_trait::async_trait;
use roller_common::{NormalizedOutputOptions, OutputBundle, OutputChunk};
use roller_error::BundleError;
use roller_sourcemap::SourceMap;

use crate::bundler_options::{InputOptions, NormalizedInputOptions};

pub use plugin_context::PluginContext;
pub use plugin_driver::PluginDriver;

pub type HookNoopReturn = anyhow::Result<()>;
pub type HookResolveIdReturn = anyhow::Result<Option<ResolvedId>>;
pub type HookLoadReturn = anyhow::Result<Option<LoadOutput>>;
pub type HookTransformReturn = anyhow::Result<Option<TransformOutput>>;
pub type HookAddonReturn = anyhow::Result<Option<String>>;

/// Result of an id resolution. `external: true` plays the role of the
/// `false` sentinel: the id is kept out of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
  pub id: String,
  pub external: bool,
}

impl ResolvedId {
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into(), external: false }
  }

  pub fn external(id: impl Into<String>) -> Self {
    Self { id: id.into(), external: true }
  }
}

#[derive(Debug, Clone)]
pub struct LoadOutput {
  pub code: String,
  pub map: Option<SourceMap>,
}

#[derive(Debug, Clone)]
pub struct TransformOutput {
  pub code: String,
  pub map: Option<SourceMap>,
}

/// First argument of the legacy `ongenerate` hook. The rendered chunk is
/// embedded here *and* passed as the hook's own chunk parameter; old
/// plugins read it from either place, so the redundancy stays.
#[derive(Debug, Clone, Copy)]
pub struct OngenerateArgs<'a> {
  pub options: &'a NormalizedOutputOptions,
  pub bundle: &'a OutputChunk,
}

#[derive(Debug, Clone, Copy)]
pub struct OnwriteArgs<'a> {
  pub options: &'a NormalizedOutputOptions,
}

/// Parser collaborator behind `PluginContext::parse`. Produces an
/// ESTree-shaped tree; its internals are not the core's business.
pub trait Parser: Send + Sync {
  fn parse(
    &self,
    code: &str,
    options: Option<&serde_json::Value>,
  ) -> anyhow::Result<serde_json::Value>;
}

/// A bundler plugin. Every hook is optional and async; hooks receive the
/// per-build [`PluginContext`] as their first argument. Errors are wrapped
/// into `PLUGIN_ERROR` failures carrying the plugin name.
#[async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> Cow<'static, str>;

  /// Reducing fold over the raw input options, applied in declared order
  /// before normalization. Return `None` to leave the options unchanged.
  async fn options(&self, _options: &InputOptions) -> anyhow::Result<Option<InputOptions>> {
    Ok(None)
  }

  async fn build_start(
    &self,
    _ctx: &PluginContext,
    _options: &NormalizedInputOptions,
  ) -> HookNoopReturn {
    Ok(())
  }

  async fn resolve_id(
    &self,
    _ctx: &PluginContext,
    _specifier: &str,
    _importer: Option<&str>,
  ) -> HookResolveIdReturn {
    Ok(None)
  }

  async fn resolve_dynamic_import(
    &self,
    _ctx: &PluginContext,
    _specifier: &str,
    _importer: &str,
  ) -> HookResolveIdReturn {
    Ok(None)
  }

  async fn load(&self, _ctx: &PluginContext, _id: &str) -> HookLoadReturn {
    Ok(None)
  }

  async fn transform(&self, _ctx: &PluginContext, _code: &str, _id: &str) -> HookTransformReturn {
    Ok(None)
  }

  async fn transform_chunk(
    &self,
    _ctx: &PluginContext,
    _code: &str,
    _options: &NormalizedOutputOptions,
  ) -> HookTransformReturn {
    Ok(None)
  }

  /// Deprecated forerunner of `transform_chunk`; consulted when the
  /// successor passes the code through untouched.
  async fn transform_bundle(
    &self,
    _ctx: &PluginContext,
    _code: &str,
    _options: &NormalizedOutputOptions,
  ) -> HookTransformReturn {
    Ok(None)
  }

  async fn build_end(&self, _ctx: &PluginContext, _error: Option<&BundleError>) -> HookNoopReturn {
    Ok(())
  }

  async fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    _options: &NormalizedOutputOptions,
    _bundle: &mut OutputBundle,
    _is_write: bool,
  ) -> HookNoopReturn {
    Ok(())
  }

  /// Deprecated; runs after each chunk is rendered.
  async fn ongenerate(
    &self,
    _ctx: &PluginContext,
    _args: &OngenerateArgs<'_>,
    _chunk: &OutputChunk,
  ) -> HookNoopReturn {
    Ok(())
  }

  /// Deprecated; runs after each chunk file is written.
  async fn onwrite(
    &self,
    _ctx: &PluginContext,
    _args: &OnwriteArgs<'_>,
    _chunk: &OutputChunk,
  ) -> HookNoopReturn {
    Ok(())
  }

  async fn banner(&self, _ctx: &PluginContext) -> HookAddonReturn {
    Ok(None)
  }

  async fn footer(&self, _ctx: &PluginContext) -> HookAddonReturn {
    Ok(None)
  }

  async fn intro(&self, _ctx: &PluginContext) -> HookAddonReturn {
    Ok(None)
  }

  async fn outro(&self, _ctx: &PluginContext) -> HookAddonReturn {
    Ok(None)
  }
}
