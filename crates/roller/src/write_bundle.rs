use std::path::{Path, PathBuf};

use roller_common::{NormalizedOutputOptions, Output, OutputBundle, OutputChunk, SourceMapType};
use roller_error::BuildResult;
use roller_fs::FileSystem;
use roller_sourcemap::{sourcemap_inline_comment, sourcemap_url_comment};

use crate::graph::Graph;
use crate::plugin::OnwriteArgs;

/// Persists one generated bundle: asset bytes as-is, chunk code with its
/// source-map comment, and for external maps the `.map` sibling first so a
/// crash never leaves code pointing at a missing map.
pub(crate) async fn write_bundle(
  graph: &Graph,
  options: &NormalizedOutputOptions,
  bundle: &OutputBundle,
) -> BuildResult<()> {
  let dir = PathBuf::from(options.output_dir());

  for output in bundle.values() {
    match output {
      Output::Asset(asset) => {
        let path = dir.join(asset.filename());
        ensure_parent(graph.fs.as_ref(), &path)?;
        graph.fs.write(&path, asset.source_as_bytes())?;
        tracing::debug!(file = %path.display(), "wrote asset");
      }
      Output::Chunk(chunk) => {
        write_chunk(graph, options, chunk, &dir).await?;
      }
    }
  }

  Ok(())
}

async fn write_chunk(
  graph: &Graph,
  options: &NormalizedOutputOptions,
  chunk: &OutputChunk,
  dir: &Path,
) -> BuildResult<()> {
  let path = dir.join(chunk.filename());
  ensure_parent(graph.fs.as_ref(), &path)?;

  let mut code = chunk.code.clone();
  match (options.sourcemap, &chunk.map) {
    (Some(SourceMapType::Inline), Some(map)) => {
      code.push_str(&sourcemap_inline_comment(map));
    }
    (Some(SourceMapType::File), Some(map)) => {
      let map_path = path.with_file_name(format!(
        "{}.map",
        path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default()
      ));
      graph.fs.write(&map_path, map.to_json_string().as_bytes())?;
      let map_basename =
        map_path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
      code.push_str(&sourcemap_url_comment(&map_basename));
    }
    _ => {}
  }

  graph.fs.write(&path, code.as_bytes())?;
  tracing::debug!(file = %path.display(), "wrote chunk");

  let args = OnwriteArgs { options };
  graph.driver.onwrite(graph.context(), &args, chunk).await?;
  Ok(())
}

fn ensure_parent(fs: &dyn FileSystem, path: &Path) -> BuildResult<()> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      fs.create_dir_all(parent)?;
    }
  }
  Ok(())
}
