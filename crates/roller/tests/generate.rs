mod common;

use std::sync::Arc;

use roller::{rollup_with, ErrorCode, Output, OutputOptions};
use roller_fs::MemoryFileSystem;

use common::{es_output, event_log, events_of, input_for, ChunkSpec, RecordingPlugin,
  ScriptedGraphBuilder};

fn memory_fs() -> Arc<MemoryFileSystem> {
  Arc::new(MemoryFileSystem::new())
}

#[tokio::test]
async fn single_entry_with_file_option_uses_its_basename() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let mut build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();

  let result = build
    .generate(OutputOptions {
      format: Some("es".to_string()),
      file: Some("out/out.js".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(result.output.len(), 1);
  let Output::Chunk(chunk) = &result.output[0] else { panic!("expected a chunk") };
  assert_eq!(chunk.filename(), "out.js");
  assert!(chunk.map.is_none());
  assert!(!chunk.code.is_empty());
}

#[tokio::test]
async fn two_entries_use_the_entry_template_and_list_entries_first() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/a.js", "a()"),
    ChunkSpec::shared("/src/lib/shared.js", "shared()").with_alias("shared"),
    ChunkSpec::entry("/src/b.js", "b()"),
  ]));
  let mut build =
    rollup_with(input_for(&["/src/a.js", "/src/b.js"]), builder, memory_fs()).await.unwrap();

  let result = build
    .generate(OutputOptions {
      format: Some("es".to_string()),
      dir: Some("d".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();

  let names: Vec<&str> = result.output.iter().map(Output::filename).collect();
  assert_eq!(names[0], "a.js");
  assert_eq!(names[1], "b.js");
  // The shared chunk got the hashed template and sorts after the entries.
  assert!(names[2].starts_with("shared-"));
  assert!(names[2].ends_with(".js"));
}

#[tokio::test]
async fn umd_with_multiple_chunks_is_invalid() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/a.js", "a()"),
    ChunkSpec::shared("/src/dep.js", "dep()"),
  ]));
  let mut build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();

  let err = build
    .generate(OutputOptions {
      format: Some("umd".to_string()),
      file: Some("o.js".to_string()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert_eq!(err.code, Some(ErrorCode::InvalidOption));
}

#[tokio::test]
async fn single_chunk_umd_succeeds() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let mut build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();

  let result = build
    .generate(OutputOptions {
      format: Some("umd".to_string()),
      file: Some("o.js".to_string()),
      name: Some("lib".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(result.output.len(), 1);
}

#[tokio::test]
async fn repeated_generate_calls_are_byte_identical() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/a.js", "a()"),
    ChunkSpec::shared("/src/dep.js", "dep()"),
  ]));
  let mut build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();

  let output = OutputOptions {
    format: Some("es".to_string()),
    dir: Some("d".to_string()),
    ..Default::default()
  };
  let first = build.generate(output.clone()).await.unwrap();
  let second = build.generate(output).await.unwrap();

  assert_eq!(first.output.len(), second.output.len());
  for (a, b) in first.output.iter().zip(second.output.iter()) {
    assert_eq!(a.filename(), b.filename());
    let (Output::Chunk(a), Output::Chunk(b)) = (a, b) else { continue };
    assert_eq!(a.code, b.code);
  }
}

#[tokio::test]
async fn chunk_optimization_runs_at_most_once_per_build() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let optimize_calls = Arc::clone(&builder.optimize_calls);

  let mut options = input_for(&["/src/a.js"]);
  options.optimize_chunks = Some(true);
  let mut build = rollup_with(options, builder, memory_fs()).await.unwrap();

  build.generate(es_output()).await.unwrap();
  build.generate(es_output()).await.unwrap();
  build.generate(es_output()).await.unwrap();

  assert_eq!(*optimize_calls.lock(), 1);
}

#[tokio::test]
async fn every_chunk_has_filename_code_and_conditional_map() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/a.js", "a()"),
    ChunkSpec::shared("/src/dep.js", "dep()"),
  ]));
  let mut build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();

  for sourcemap in [None, Some(roller::SourceMapType::File)] {
    let result = build
      .generate(OutputOptions {
        format: Some("es".to_string()),
        dir: Some("d".to_string()),
        sourcemap,
        ..Default::default()
      })
      .await
      .unwrap();
    for output in &result.output {
      let Output::Chunk(chunk) = output else { continue };
      assert!(!chunk.filename().is_empty());
      assert!(!chunk.code.is_empty());
      assert_eq!(chunk.map.is_some(), sourcemap.is_some());
    }
  }
}

#[tokio::test]
async fn template_filenames_are_unique_within_a_bundle() {
  // Two entries with the same stem collide on the `[name].js` template.
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/one/index.js", "one()"),
    ChunkSpec::entry("/src/two/index.js", "two()"),
  ]));
  let mut build = rollup_with(
    input_for(&["/src/one/index.js", "/src/two/index.js"]),
    builder,
    memory_fs(),
  )
  .await
  .unwrap();

  let result = build
    .generate(OutputOptions {
      format: Some("es".to_string()),
      dir: Some("d".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();

  let mut names: Vec<&str> = result.output.iter().map(Output::filename).collect();
  assert_eq!(names.len(), 2);
  names.sort();
  names.dedup();
  assert_eq!(names.len(), 2, "colliding chunk names were not disambiguated");
}

#[tokio::test]
async fn export_mode_auto_picks_default_for_a_lone_default_export() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/a.js", "a()").with_exports(&["default"]),
  ]));
  let mut build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();
  // `auto` accepts a lone default export without complaint.
  build.generate(es_output()).await.unwrap();
}

#[tokio::test]
async fn export_mode_none_rejects_exports() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/a.js", "a()").with_exports(&["thing"]),
  ]));
  let mut build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();

  let err = build
    .generate(OutputOptions {
      format: Some("cjs".to_string()),
      exports: Some("none".to_string()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert_eq!(err.code, Some(ErrorCode::InvalidOption));
}

#[tokio::test]
async fn ongenerate_runs_for_every_chunk_after_render() {
  let events = event_log();
  let mut options = input_for(&["/src/a.js"]);
  options.plugins = vec![Arc::new(RecordingPlugin::new("legacy", events.clone()))];

  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/a.js", "a()"),
    ChunkSpec::shared("/src/dep.js", "dep()"),
  ]));
  let mut build = rollup_with(options, builder, memory_fs()).await.unwrap();
  build
    .generate(OutputOptions {
      format: Some("es".to_string()),
      dir: Some("d".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();

  let recorded = events_of(&events);
  assert_eq!(recorded.iter().filter(|e| e.contains("ongenerate(")).count(), 2);
}

#[tokio::test]
async fn timings_expose_build_and_generate_under_perf() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let mut options = input_for(&["/src/a.js"]);
  options.perf = Some(true);
  let mut build = rollup_with(options, builder, memory_fs()).await.unwrap();
  build.generate(es_output()).await.unwrap();

  let timings = build.timings().expect("perf builds expose timings");
  assert!(timings.contains_key("# BUILD"));
  assert!(timings.contains_key("# GENERATE"));

  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let build = rollup_with(input_for(&["/src/a.js"]), builder, memory_fs()).await.unwrap();
  assert!(build.timings().is_none());
}

#[tokio::test]
async fn preserve_modules_names_follow_the_source_layout() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![
    ChunkSpec::entry("/src/pages/home.js", "home()"),
    ChunkSpec::entry("/src/pages/admin/index.js", "admin()"),
  ]));
  let mut options = input_for(&["/src/pages/home.js", "/src/pages/admin/index.js"]);
  options.preserve_modules = Some(true);
  let mut build = rollup_with(options, builder, memory_fs()).await.unwrap();

  let result = build
    .generate(OutputOptions {
      format: Some("es".to_string()),
      dir: Some("d".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();

  let names: Vec<&str> = result.output.iter().map(Output::filename).collect();
  assert!(names.contains(&"home.js"));
  assert!(names.contains(&"admin/index.js"));
}

#[tokio::test]
async fn entry_aliases_drive_names() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec {
    id: "/src/main.js",
    alias: Some("app"),
    is_entry: true,
    facade: true,
    exports: vec![],
    code: "main()",
  }]));
  let mut build = rollup_with(input_for(&["/src/main.js"]), builder, memory_fs()).await.unwrap();

  let result = build
    .generate(OutputOptions {
      format: Some("es".to_string()),
      dir: Some("d".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(result.output[0].filename(), "app.js");
}

#[tokio::test]
async fn banners_arrive_in_declared_order() {
  let builder = Arc::new(ScriptedGraphBuilder::new(vec![ChunkSpec::entry("/src/a.js", "a()")]));
  let mut options = input_for(&["/src/a.js"]);
  options.output = Some(OutputOptions {
    banner: Some("/* from config */".into()),
    ..Default::default()
  });
  let mut build = rollup_with(options, builder, memory_fs()).await.unwrap();

  let result = build.generate(es_output()).await.unwrap();
  let Output::Chunk(chunk) = &result.output[0] else { panic!("expected a chunk") };
  assert!(chunk.code.starts_with("/* from config */\n"));
}
