pub mod determine_export_mode;
pub mod validate_output;
