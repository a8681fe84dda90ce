pub mod addon;
pub mod amd_options;
pub mod external_option;
pub mod filename_template;
pub mod input_item;
pub mod normalized_output_options;
pub mod output_exports;
pub mod output_format;
pub mod output_options;
pub mod source_map_type;
