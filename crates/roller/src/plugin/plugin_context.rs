use std::sync::Arc;

use roller_common::{ExternalOption, StrOrBytes, WatcherHandle};
use roller_error::{BuildResult, BundleError, ErrorCode, Warning, WarningHandler};

use crate::graph::GraphBuilder;
use crate::plugin::{Parser, PluginDriver, ResolvedId};
use crate::utils::assets::SharedAssetRegistry;

/// Per-build capability object handed to every hook. One context exists per
/// build; `generateBundle` hooks get a derived context whose asset
/// operations act on a registry scoped to that generate call.
#[derive(Clone)]
pub struct PluginContext {
  pub(crate) driver: Arc<PluginDriver>,
  pub(crate) builder: Arc<dyn GraphBuilder>,
  pub(crate) assets: SharedAssetRegistry,
  pub(crate) on_warn: WarningHandler,
  pub(crate) external: ExternalOption,
  pub(crate) watcher: Option<WatcherHandle>,
  pub(crate) parser: Option<Arc<dyn Parser>>,
}

impl PluginContext {
  /// Forwards a warning to the user sink. Plain strings become structured
  /// warnings; a position is attached when given.
  pub fn warn(&self, warning: impl Into<Warning>, pos: Option<u32>) {
    let mut warning = warning.into();
    if pos.is_some() {
      warning.pos = pos;
    }
    (self.on_warn)(warning);
  }

  /// Builds a failure value for the hook to return. Hooks are expected to
  /// propagate it immediately (`return Err(ctx.error(...))`); the driver
  /// attaches the plugin name on the way out.
  pub fn error(&self, message: impl Into<String>, pos: Option<u32>) -> anyhow::Error {
    let mut err = BundleError::new(ErrorCode::PluginError, message);
    err.pos = pos;
    anyhow::Error::new(err)
  }

  /// Parses source text through the graph's parser collaborator.
  pub fn parse(
    &self,
    code: &str,
    options: Option<&serde_json::Value>,
  ) -> anyhow::Result<serde_json::Value> {
    match &self.parser {
      Some(parser) => parser.parse(code, options),
      None => anyhow::bail!("this build has no parser; context.parse is unavailable"),
    }
  }

  /// Resolves an import the way the graph would: the full `resolveId` hook
  /// chain first, then the graph's own resolution.
  pub async fn resolve_id(
    &self,
    specifier: &str,
    importer: Option<&str>,
  ) -> BuildResult<Option<ResolvedId>> {
    self.builder.resolve_id(&self.driver, self, specifier, importer).await
  }

  /// Applies the external-module policy.
  pub fn is_external(&self, id: &str, importer: Option<&str>, is_resolved: bool) -> bool {
    self.external.is_external(id, importer, is_resolved)
  }

  /// Registers an asset and returns its id. The source may be supplied
  /// later through [`PluginContext::set_asset_source`].
  pub fn emit_asset(&self, name: &str, source: Option<StrOrBytes>) -> String {
    self.assets.write().emit(name, source)
  }

  pub fn set_asset_source(&self, asset_id: &str, source: StrOrBytes) -> BuildResult<()> {
    self.assets.write().set_source(asset_id, source)
  }

  /// Final filename of an asset; fails until the registry has assigned one.
  pub fn get_asset_file_name(&self, asset_id: &str) -> BuildResult<String> {
    self.assets.read().file_name(asset_id)
  }

  /// The enclosing watch reactor, absent under one-shot builds.
  pub fn watcher(&self) -> Option<&WatcherHandle> {
    self.watcher.as_ref()
  }

  /// Derived context for `generateBundle`: same capabilities, asset
  /// operations redirected to the given per-call registry.
  pub(crate) fn scoped_to_assets(&self, assets: SharedAssetRegistry) -> Self {
    let mut scoped = self.clone();
    scoped.assets = assets;
    scoped
  }
}
