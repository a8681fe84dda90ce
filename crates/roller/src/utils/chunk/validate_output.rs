use roller_common::NormalizedOutputOptions;
use roller_error::{BuildResult, BundleError, ErrorCode};

/// Checks that depend on the actual chunk count, run once the chunk
/// sequence is known.
pub fn validate_options_for_chunk_count(
  options: &NormalizedOutputOptions,
  chunk_count: usize,
) -> BuildResult<()> {
  if chunk_count <= 1 {
    return Ok(());
  }
  if options.format.is_single_chunk_only() {
    return Err(BundleError::new(
      ErrorCode::InvalidOption,
      format!(
        "\"{}\" output format is not supported when building multiple chunks.",
        options.format
      ),
    ));
  }
  if options.file.is_some() {
    return Err(BundleError::new(
      ErrorCode::InvalidOption,
      "When building multiple chunks, the \"output.dir\" option must be used, not \"output.file\".",
    ));
  }
  if options.sourcemap_file.is_some() {
    return Err(BundleError::new(
      ErrorCode::InvalidOption,
      "\"output.sourcemapFile\" is only supported for single-file builds.",
    ));
  }
  Ok(())
}
