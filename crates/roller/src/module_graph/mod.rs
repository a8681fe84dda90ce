mod entry_chunk;

use std::path::Path;

use async_trait::async_trait;
use futures::future::try_join_all;
use parking_lot::Mutex;
use roller_common::{BuildCache, InputItem, ModuleCacheRecord};
use roller_error::{BuildResult, BundleError};
use roller_fs::FileSystem;
use sugar_path::SugarPath;

use crate::graph::{GraphBuildArgs, GraphBuilder};
use crate::plugin::{PluginContext, PluginDriver, ResolvedId};
use crate::Chunk;

pub use entry_chunk::EntryChunk;

/// The default graph collaborator: one chunk per entry module, sources
/// pulled through the full `resolveId`/`load`/`transform` hook chains.
/// Imports are not traced, so builds that need real dependency analysis
/// inject their own [`GraphBuilder`].
#[derive(Debug, Default)]
pub struct FlatGraphBuilder {
  cache: Mutex<BuildCache>,
}

#[async_trait]
impl GraphBuilder for FlatGraphBuilder {
  async fn build(&self, args: GraphBuildArgs<'_>) -> BuildResult<Vec<Box<dyn Chunk>>> {
    let modules = try_join_all(
      args.options.input.iter().map(|item| self.load_entry(&args, item)),
    )
    .await?;

    let mut cache = BuildCache::default();
    let mut chunks: Vec<Box<dyn Chunk>> = Vec::with_capacity(modules.len());
    for (record, chunk) in modules {
      cache.modules.push(record);
      chunks.push(Box::new(chunk));
    }
    *self.cache.lock() = cache;
    Ok(chunks)
  }

  async fn resolve_id(
    &self,
    driver: &PluginDriver,
    ctx: &PluginContext,
    specifier: &str,
    importer: Option<&str>,
  ) -> BuildResult<Option<ResolvedId>> {
    if let Some(resolved) = driver.resolve_id(ctx, specifier, importer).await? {
      return Ok(Some(resolved));
    }
    if ctx.is_external(specifier, importer, false) {
      return Ok(Some(ResolvedId::external(specifier)));
    }
    Ok(Some(ResolvedId::new(default_resolve(specifier, importer))))
  }

  fn cache(&self) -> BuildCache {
    self.cache.lock().clone()
  }
}

impl FlatGraphBuilder {
  async fn load_entry(
    &self,
    args: &GraphBuildArgs<'_>,
    item: &InputItem,
  ) -> BuildResult<(ModuleCacheRecord, EntryChunk)> {
    let resolved = self
      .resolve_id(args.driver, args.ctx, &item.import, None)
      .await?
      .expect("the flat graph always resolves entries");
    if resolved.external {
      return Err(BundleError::from(anyhow::anyhow!(
        "Entry module \"{}\" cannot be external.",
        item.import
      )));
    }

    let id = existing_id(args.fs.as_ref(), resolved.id);
    if let Some(watcher) = args.ctx.watcher() {
      watcher.add_watch_file(&id);
    }

    let original = match args.driver.load(args.ctx, &id).await? {
      Some(output) => output.code,
      None => args.fs.read_to_string(Path::new(&id)).map_err(|err| {
        BundleError::from(anyhow::anyhow!("Could not load entry module \"{id}\": {err}"))
      })?,
    };

    let code = args.driver.transform(args.ctx, original.clone(), &id).await?;

    let record = ModuleCacheRecord {
      id: id.clone(),
      original_code: Some(original),
      code: code.clone(),
      dependencies: Vec::new(),
    };
    Ok((record, EntryChunk::new(item.name.clone(), id, code)))
  }
}

/// Path-based fallback when no plugin resolves a specifier: relative
/// requests resolve against their importer, everything else is used as-is.
fn default_resolve(specifier: &str, importer: Option<&str>) -> String {
  if specifier.starts_with('.') {
    if let Some(importer) = importer {
      if let Some(importer_dir) = Path::new(importer).parent() {
        return importer_dir.join(specifier).normalize().to_string_lossy().into_owned();
      }
    }
  }
  Path::new(specifier).normalize().to_string_lossy().into_owned()
}

/// Module requests may omit the `.js` extension.
fn existing_id(fs: &dyn FileSystem, id: String) -> String {
  if fs.exists(Path::new(&id)) {
    return id;
  }
  let with_ext = format!("{id}.js");
  if fs.exists(Path::new(&with_ext)) {
    return with_ext;
  }
  id
}
