mod common;

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use roller::{rollup_with, ErrorCode, InputOptions, Plugin};
use roller_fs::MemoryFileSystem;

use common::{
  es_output, event_log, events_of, input_for, ChunkSpec, RecordingPlugin, ScriptedGraphBuilder,
};

fn memory_fs() -> Arc<MemoryFileSystem> {
  Arc::new(MemoryFileSystem::new())
}

#[tokio::test]
async fn build_start_and_end_run_once_per_plugin_in_pairs() {
  let events = event_log();
  let mut options = input_for(&["/src/a.js"]);
  options.plugins = vec![
    Arc::new(RecordingPlugin::new("one", events.clone())),
    Arc::new(RecordingPlugin::new("two", events.clone())),
  ];

  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  rollup_with(options, builder, memory_fs()).await.unwrap();

  let recorded = events_of(&events);
  assert_eq!(recorded.iter().filter(|e| e.ends_with(":buildStart")).count(), 2);
  assert_eq!(recorded.iter().filter(|e| e.contains(":buildEnd")).count(), 2);
  for name in ["one", "two"] {
    let start = recorded.iter().position(|e| e == &format!("{name}:buildStart")).unwrap();
    let end = recorded.iter().position(|e| e == &format!("{name}:buildEnd(error=false)")).unwrap();
    assert!(start < end, "{name} saw buildEnd before buildStart");
  }
}

#[tokio::test]
async fn graph_failure_still_reaches_build_end_with_the_error() {
  let events = event_log();
  let mut options = input_for(&["/src/a.js"]);
  options.plugins = vec![Arc::new(RecordingPlugin::new("watcher", events.clone()))];

  let builder = Arc::new(ScriptedGraphBuilder::failing("no modules today"));
  let err = rollup_with(options, builder, memory_fs()).await.unwrap_err();

  assert_eq!(err.message, "no modules today");
  let recorded = events_of(&events);
  assert!(recorded.contains(&"watcher:buildStart".to_string()));
  assert!(recorded.contains(&"watcher:buildEnd(error=true)".to_string()));
}

#[tokio::test]
async fn build_start_failure_is_wrapped_and_paired() {
  let events = event_log();
  let mut failing = RecordingPlugin::new("bad", events.clone());
  failing.fail_build_start = true;

  let mut options = input_for(&["/src/a.js"]);
  options.plugins = vec![Arc::new(failing), Arc::new(RecordingPlugin::new("good", events.clone()))];

  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let err = rollup_with(options, builder, memory_fs()).await.unwrap_err();

  assert_eq!(err.code, Some(ErrorCode::PluginError));
  assert_eq!(err.plugin.as_deref(), Some("bad"));

  let recorded = events_of(&events);
  // The sibling hook still ran, and both plugins saw buildEnd.
  assert!(recorded.contains(&"good:buildStart".to_string()));
  assert!(recorded.contains(&"bad:buildEnd(error=true)".to_string()));
  assert!(recorded.contains(&"good:buildEnd(error=true)".to_string()));
}

#[tokio::test]
async fn build_end_failure_does_not_mask_the_original_error() {
  let events = event_log();
  let mut plugin = RecordingPlugin::new("cleanup", events.clone());
  plugin.fail_build_end = true;

  let mut options = input_for(&["/src/a.js"]);
  options.plugins = vec![Arc::new(plugin)];

  let builder = Arc::new(ScriptedGraphBuilder::failing("graph fell over"));
  let err = rollup_with(options, builder, memory_fs()).await.unwrap_err();

  assert_eq!(err.message, "graph fell over");
}

struct ContextSettingPlugin;

#[async_trait]
impl Plugin for ContextSettingPlugin {
  fn name(&self) -> Cow<'static, str> {
    "context-setter".into()
  }

  async fn options(&self, options: &InputOptions) -> anyhow::Result<Option<InputOptions>> {
    let mut replaced = options.clone();
    replaced.context = Some("window".to_string());
    Ok(Some(replaced))
  }
}

struct ContextReadingPlugin {
  seen: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl Plugin for ContextReadingPlugin {
  fn name(&self) -> Cow<'static, str> {
    "context-reader".into()
  }

  async fn options(&self, options: &InputOptions) -> anyhow::Result<Option<InputOptions>> {
    *self.seen.lock() = options.context.clone();
    Ok(None)
  }
}

#[tokio::test]
async fn options_hooks_fold_left_to_right() {
  let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
  let mut options = input_for(&["/src/a.js"]);
  options.plugins = vec![
    Arc::new(ContextSettingPlugin),
    Arc::new(ContextReadingPlugin { seen: Arc::clone(&seen) }),
  ];

  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  rollup_with(options, builder, memory_fs()).await.unwrap();

  assert_eq!(seen.lock().as_deref(), Some("window"));
}

struct FailOncePlugin {
  remaining_failures: Arc<Mutex<u32>>,
}

#[async_trait]
impl Plugin for FailOncePlugin {
  fn name(&self) -> Cow<'static, str> {
    "flaky".into()
  }

  async fn generate_bundle(
    &self,
    _ctx: &roller::PluginContext,
    _options: &roller::NormalizedOutputOptions,
    _bundle: &mut roller::OutputBundle,
    _is_write: bool,
  ) -> roller::HookNoopReturn {
    let mut remaining = self.remaining_failures.lock();
    if *remaining > 0 {
      *remaining -= 1;
      anyhow::bail!("transient failure");
    }
    Ok(())
  }
}

#[tokio::test]
async fn generate_failure_leaves_the_build_usable() {
  let mut options = input_for(&["/src/a.js"]);
  options.plugins =
    vec![Arc::new(FailOncePlugin { remaining_failures: Arc::new(Mutex::new(1)) })];

  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let mut build = rollup_with(options, builder, memory_fs()).await.unwrap();

  let err = build.generate(es_output()).await.unwrap_err();
  assert_eq!(err.code, Some(ErrorCode::PluginError));
  assert_eq!(err.plugin.as_deref(), Some("flaky"));

  // The handle survives a failed generate; the next call succeeds.
  let bundle = build.generate(es_output()).await.unwrap();
  assert_eq!(bundle.output.len(), 1);
}
