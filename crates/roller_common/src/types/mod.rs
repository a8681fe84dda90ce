pub mod build_cache;
pub mod output;
pub mod output_asset;
pub mod output_chunk;
pub mod rendered_module;
pub mod str_or_bytes;
pub mod watcher;
