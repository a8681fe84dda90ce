pub mod commondir;
pub mod path_ext;
pub mod sanitize_file_name;
pub mod unique_name;
pub mod xxhash;
