use std::path::Path;

use roller_common::{
  FileNameRenderOptions, FilenameTemplate, NormalizedOutputOptions, Output, OutputBundle,
  OutputChunk,
};
use roller_error::BuildResult;
use roller_utils::path_ext::PathExt;
use roller_utils::sanitize_file_name::sanitize_file_name;
use roller_utils::unique_name::make_unique;
use roller_utils::xxhash::xxhash_short;
use sugar_path::SugarPath;

use crate::bundler_options::NormalizedInputOptions;
use crate::chunk::{Addons, Chunk};

/// Names every chunk for this generate call and materializes a skeleton
/// output record per chunk; `code` and `map` land after render. Filename
/// slots are cleared first so each chunk is named exactly once per call.
pub(crate) fn assign_chunk_filenames(
  chunks: &mut [Box<dyn Chunk>],
  input_options: &NormalizedInputOptions,
  options: &NormalizedOutputOptions,
  addons: &Addons,
  bundle: &mut OutputBundle,
  input_base: &Path,
) -> BuildResult<()> {
  for chunk in chunks.iter_mut() {
    chunk.reset_filename();
  }

  for chunk in chunks.iter_mut() {
    let candidate = if let Some(file) = &options.file {
      Path::new(file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.clone())
    } else if input_options.preserve_modules {
      preserve_modules_filename(chunk.as_ref(), input_base)
    } else {
      let template = FilenameTemplate::new(if chunk.is_entry_module_facade() {
        options.entry_filenames.as_str()
      } else {
        options.chunk_filenames.as_str()
      });
      let name = chunk_name(chunk.as_ref());
      let hash = content_hash(chunk.as_ref(), addons, options);
      template.render(&FileNameRenderOptions {
        name: Some(&name),
        hash: Some(&hash),
        ext: Some("js"),
        format: Some(options.format.as_str()),
      })
    };

    let filename = make_unique(&candidate, |name| bundle.contains_key(name));
    chunk.assign_filename(filename.clone());

    let skeleton = OutputChunk {
      filename: filename.clone().into(),
      is_entry: chunk.is_entry(),
      facade_module_id: if chunk.is_entry_module_facade() {
        chunk.entry_module_id().map(str::to_string)
      } else {
        None
      },
      ..Default::default()
    };
    bundle.insert(filename, Output::Chunk(skeleton));
  }

  Ok(())
}

/// `[name]` for a chunk: the user alias when one exists, otherwise the
/// sanitized stem of the entry module id. This is the same stem convention
/// the asset registry applies to asset names, so chunk and asset templates
/// expand consistently; entries whose stems coincide are told apart by the
/// bundle-wide uniqueness suffix, not here.
fn chunk_name(chunk: &dyn Chunk) -> String {
  if let Some(hint) = chunk.name_hint() {
    return sanitize_file_name(hint);
  }
  chunk
    .entry_module_id()
    .and_then(|id| Path::new(id).file_stem())
    .map(|stem| sanitize_file_name(&stem.to_string_lossy()))
    .filter(|name| !name.is_empty())
    .unwrap_or_else(|| "chunk".to_string())
}

/// `[hash]` covers the pre-rendered content, the addons, and the format, so
/// a change to any of them produces a fresh name.
fn content_hash(chunk: &dyn Chunk, addons: &Addons, options: &NormalizedOutputOptions) -> String {
  let mut input = chunk.rendered_hash().into_bytes();
  input.extend_from_slice(&addons.hash_input());
  input.extend_from_slice(options.format.as_str().as_bytes());
  xxhash_short(&input)
}

/// Under `preserveModules` the filename mirrors the entry module's path
/// relative to the common input directory.
fn preserve_modules_filename(chunk: &dyn Chunk, input_base: &Path) -> String {
  let Some(entry_id) = chunk.entry_module_id() else {
    return "chunk.js".to_string();
  };
  let relative = Path::new(entry_id).relative(input_base);
  let mut filename = relative.as_path().to_forward_slash();
  if relative.extension().is_none() {
    filename.push_str(".js");
  }
  filename
}
