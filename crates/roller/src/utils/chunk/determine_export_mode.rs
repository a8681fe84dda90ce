use roller_common::{NormalizedOutputOptions, OutputExports};
use roller_error::{BuildResult, BundleError, ErrorCode, Warning, WarningHandler};

use crate::chunk::Chunk;

/// Resolves the export mode of an entry facade. `auto` picks `default` for
/// a lone default export and `named` otherwise; explicit modes are checked
/// against the facade's actual exports.
pub fn determine_export_mode(
  on_warn: &WarningHandler,
  chunk: &dyn Chunk,
  options: &NormalizedOutputOptions,
) -> BuildResult<OutputExports> {
  let export_names = chunk.get_export_names();
  let entry_id = chunk.entry_module_id().unwrap_or("entry").to_string();

  match options.exports {
    OutputExports::Named => Ok(OutputExports::Named),
    OutputExports::Default => {
      if export_names.len() != 1 || export_names[0] != "default" {
        return Err(BundleError::new(
          ErrorCode::InvalidOption,
          format!(
            r#""default" was specified for "output.exports", but entry module "{}" has the following exports: {}."#,
            entry_id,
            quoted_list(&export_names)
          ),
        ));
      }
      Ok(OutputExports::Default)
    }
    OutputExports::None => {
      if !export_names.is_empty() {
        return Err(BundleError::new(
          ErrorCode::InvalidOption,
          format!(
            r#""none" was specified for "output.exports", but entry module "{}" has the following exports: {}."#,
            entry_id,
            quoted_list(&export_names)
          ),
        ));
      }
      Ok(OutputExports::None)
    }
    OutputExports::Auto => {
      if export_names.is_empty() {
        Ok(OutputExports::None)
      } else if export_names.len() == 1 && export_names[0] == "default" {
        Ok(OutputExports::Default)
      } else {
        if export_names.iter().any(|name| name == "default") {
          on_warn(
            Warning::new(format!(
              r#"Entry module "{}" is using named and default exports together. Consumers of your bundle will have to use chunk.default to access the default export, which may not be what you want. Use `output.exports: "named"` to disable this warning."#,
              entry_id
            ))
            .with_code("MIXED_EXPORTS"),
          );
        }
        Ok(OutputExports::Named)
      }
    }
  }
}

fn quoted_list(names: &[String]) -> String {
  names.iter().map(|name| format!("\"{name}\"")).collect::<Vec<_>>().join(", ")
}
