#![allow(dead_code)]

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use roller::{
  Addons, BuildResult, BundleError, Chunk, GraphBuildArgs, GraphBuilder, HookNoopReturn,
  InputOptions, NormalizedInputOptions, NormalizedOutputOptions, OngenerateArgs, OnwriteArgs,
  OutputBundle, OutputChunk, OutputExports, Plugin, PluginContext, PluginDriver,
  RenderedChunkContent, ResolvedId, SourceMap, Warning,
};

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
  Arc::new(Mutex::new(Vec::new()))
}

pub fn events_of(log: &EventLog) -> Vec<String> {
  log.lock().clone()
}

/// Collects warnings into a vector for assertions.
pub fn collecting_warn_sink() -> (Arc<Mutex<Vec<Warning>>>, roller::WarningHandler) {
  let warnings: Arc<Mutex<Vec<Warning>>> = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&warnings);
  (warnings, Arc::new(move |warning| sink.lock().push(warning)))
}

/// Plugin that records every hook invocation and can be told to fail at
/// chosen points.
#[derive(Default)]
pub struct RecordingPlugin {
  pub plugin_name: &'static str,
  pub events: EventLog,
  pub fail_build_start: bool,
  pub fail_build_end: bool,
  pub fail_generate_bundle: bool,
}

impl RecordingPlugin {
  pub fn new(plugin_name: &'static str, events: EventLog) -> Self {
    Self { plugin_name, events, ..Self::default() }
  }

  fn record(&self, event: &str) {
    self.events.lock().push(format!("{}:{event}", self.plugin_name));
  }
}

#[async_trait]
impl Plugin for RecordingPlugin {
  fn name(&self) -> Cow<'static, str> {
    self.plugin_name.into()
  }

  async fn build_start(
    &self,
    _ctx: &PluginContext,
    _options: &NormalizedInputOptions,
  ) -> HookNoopReturn {
    self.record("buildStart");
    if self.fail_build_start {
      anyhow::bail!("buildStart exploded");
    }
    Ok(())
  }

  async fn build_end(&self, _ctx: &PluginContext, error: Option<&BundleError>) -> HookNoopReturn {
    self.record(&format!("buildEnd(error={})", error.is_some()));
    if self.fail_build_end {
      anyhow::bail!("buildEnd exploded");
    }
    Ok(())
  }

  async fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    _options: &NormalizedOutputOptions,
    _bundle: &mut OutputBundle,
    is_write: bool,
  ) -> HookNoopReturn {
    self.record(&format!("generateBundle(isWrite={is_write})"));
    if self.fail_generate_bundle {
      anyhow::bail!("generateBundle exploded");
    }
    Ok(())
  }

  async fn ongenerate(
    &self,
    _ctx: &PluginContext,
    args: &OngenerateArgs<'_>,
    chunk: &OutputChunk,
  ) -> HookNoopReturn {
    // The chunk rides along twice; old plugins read either copy.
    assert_eq!(args.bundle.filename(), chunk.filename());
    self.record(&format!("ongenerate({})", chunk.filename()));
    Ok(())
  }

  async fn onwrite(
    &self,
    _ctx: &PluginContext,
    _args: &OnwriteArgs<'_>,
    chunk: &OutputChunk,
  ) -> HookNoopReturn {
    self.record(&format!("onwrite({})", chunk.filename()));
    Ok(())
  }
}

/// Blueprint for one scripted chunk.
#[derive(Debug, Clone)]
pub struct ChunkSpec {
  pub id: &'static str,
  pub alias: Option<&'static str>,
  pub is_entry: bool,
  pub facade: bool,
  pub exports: Vec<&'static str>,
  pub code: &'static str,
}

impl ChunkSpec {
  pub fn entry(id: &'static str, code: &'static str) -> Self {
    Self { id, alias: None, is_entry: true, facade: true, exports: Vec::new(), code }
  }

  pub fn shared(id: &'static str, code: &'static str) -> Self {
    Self { id, alias: None, is_entry: false, facade: false, exports: Vec::new(), code }
  }

  pub fn with_exports(mut self, exports: &[&'static str]) -> Self {
    self.exports = exports.to_vec();
    self
  }

  pub fn with_alias(mut self, alias: &'static str) -> Self {
    self.alias = Some(alias);
    self
  }
}

/// Chunk driven entirely by its spec; renders deterministic code so
/// repeated generate calls can be compared byte for byte.
pub struct ScriptedChunk {
  spec: ChunkSpec,
  export_mode: OutputExports,
  filename: Option<String>,
  pre_rendered: bool,
}

impl ScriptedChunk {
  pub fn new(spec: ChunkSpec) -> Self {
    Self { spec, export_mode: OutputExports::Auto, filename: None, pre_rendered: false }
  }
}

#[async_trait]
impl Chunk for ScriptedChunk {
  fn is_entry(&self) -> bool {
    self.spec.is_entry
  }

  fn is_entry_module_facade(&self) -> bool {
    self.spec.facade
  }

  fn entry_module_id(&self) -> Option<&str> {
    self.spec.is_entry.then_some(self.spec.id)
  }

  fn name_hint(&self) -> Option<&str> {
    self.spec.alias
  }

  fn get_export_names(&self) -> Vec<String> {
    self.spec.exports.iter().map(|name| name.to_string()).collect()
  }

  fn set_export_mode(&mut self, mode: OutputExports) {
    self.export_mode = mode;
  }

  fn pre_render(
    &mut self,
    _options: &NormalizedOutputOptions,
    _input_base: &Path,
  ) -> BuildResult<()> {
    self.pre_rendered = true;
    Ok(())
  }

  fn rendered_hash(&self) -> String {
    self.spec.code.to_string()
  }

  fn filename(&self) -> Option<&str> {
    self.filename.as_deref()
  }

  fn reset_filename(&mut self) {
    self.filename = None;
  }

  fn assign_filename(&mut self, filename: String) {
    assert!(self.filename.is_none(), "chunk named twice in one generate call");
    self.filename = Some(filename);
  }

  async fn render(
    &mut self,
    options: &NormalizedOutputOptions,
    addons: &Addons,
    driver: &PluginDriver,
    ctx: &PluginContext,
  ) -> BuildResult<RenderedChunkContent> {
    assert!(self.pre_rendered, "render before preRender");
    let mut code = String::new();
    if !addons.banner.is_empty() {
      code.push_str(&addons.banner);
      code.push('\n');
    }
    code.push_str(self.spec.code);
    code.push('\n');
    if !addons.footer.is_empty() {
      code.push_str(&addons.footer);
      code.push('\n');
    }
    let code = driver.transform_chunk(ctx, code, options).await?;
    let map = options
      .sourcemap
      .map(|_| SourceMap::new(vec![self.spec.id.to_string()], String::new()));
    Ok(RenderedChunkContent { code, map })
  }
}

/// Graph collaborator that hands back chunks built from specs and counts
/// optimization passes.
#[derive(Default)]
pub struct ScriptedGraphBuilder {
  pub specs: Vec<ChunkSpec>,
  pub fail_build: Option<&'static str>,
  pub optimize_calls: Arc<Mutex<u32>>,
}

impl ScriptedGraphBuilder {
  pub fn new(specs: Vec<ChunkSpec>) -> Self {
    Self { specs, ..Self::default() }
  }

  pub fn failing(message: &'static str) -> Self {
    Self { fail_build: Some(message), ..Self::default() }
  }
}

#[async_trait]
impl GraphBuilder for ScriptedGraphBuilder {
  async fn build(&self, _args: GraphBuildArgs<'_>) -> BuildResult<Vec<Box<dyn Chunk>>> {
    if let Some(message) = self.fail_build {
      return Err(BundleError::from(anyhow::anyhow!(message)));
    }
    Ok(
      self
        .specs
        .iter()
        .cloned()
        .map(|spec| Box::new(ScriptedChunk::new(spec)) as Box<dyn Chunk>)
        .collect(),
    )
  }

  async fn resolve_id(
    &self,
    driver: &PluginDriver,
    ctx: &PluginContext,
    specifier: &str,
    importer: Option<&str>,
  ) -> BuildResult<Option<ResolvedId>> {
    driver.resolve_id(ctx, specifier, importer).await
  }

  fn optimize_chunks(
    &self,
    _chunks: &mut Vec<Box<dyn Chunk>>,
    _options: &NormalizedOutputOptions,
    _chunk_grouping_size: usize,
    _input_base: &Path,
  ) {
    *self.optimize_calls.lock() += 1;
  }
}

pub fn input_for(entries: &[&str]) -> InputOptions {
  let paths: Vec<String> = entries.iter().map(|entry| entry.to_string()).collect();
  InputOptions { input: Some(paths.into()), ..Default::default() }
}

pub fn es_output() -> roller::OutputOptions {
  roller::OutputOptions { format: Some("es".to_string()), ..Default::default() }
}
