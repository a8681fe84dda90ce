use roller_common::{Output, OutputBundle};

/// Orders the final output list: entry chunks first, then shared chunks,
/// then assets, each category in emission order. The sort is stable and
/// total, so repeated generate calls list identical bundles identically.
pub(crate) fn create_output(bundle: OutputBundle) -> Vec<Output> {
  let mut outputs: Vec<Output> = bundle.into_values().collect();
  outputs.sort_by_key(|output| match output {
    Output::Chunk(chunk) if chunk.is_entry => 0u8,
    Output::Chunk(_) => 1,
    Output::Asset(_) => 2,
  });
  outputs
}
