use std::sync::Arc;

use roller_common::{
  AmdOptions, InputSpec, NormalizedOutputOptions, OutputExports, OutputFormat, OutputOptions,
};
use roller_error::{BuildResult, BundleError, ErrorCode, Warning, WarningHandler};

use crate::bundler_options::{InputOptions, NormalizedInputOptions};

const CHUNK_GROUPING_SIZE: usize = 5000;

pub(crate) fn default_on_warn() -> WarningHandler {
  Arc::new(|warning: Warning| {
    tracing::warn!(
      code = warning.code.as_deref().unwrap_or_default(),
      plugin = warning.plugin.as_deref().unwrap_or_default(),
      "{}",
      warning.message
    );
  })
}

fn deprecated_options_warning(renamed: &[(&str, &str)]) -> Warning {
  let pairs =
    renamed.iter().map(|(from, to)| format!("{from} -> {to}")).collect::<Vec<_>>().join(", ");
  Warning::new(format!(
    "The following options have been renamed - please update your config: {pairs}"
  ))
  .with_code("DEPRECATED_OPTIONS")
}

fn invalid(message: impl Into<String>) -> BundleError {
  BundleError::new(ErrorCode::InvalidOption, message)
}

/// Folds plugin `options` hooks over the raw configuration, applies
/// deprecation rewrites, validates exclusive combinations, and freezes the
/// result. Runs once per build, before any other work.
pub async fn normalize_input_options(
  mut raw: InputOptions,
) -> BuildResult<NormalizedInputOptions> {
  let hook_plugins = raw.plugins.clone();
  for plugin in &hook_plugins {
    match plugin.options(&raw).await {
      Ok(Some(replacement)) => raw = replacement,
      Ok(None) => {}
      Err(err) => return Err(BundleError::from_plugin(&plugin.name(), err)),
    }
  }

  let removed: Vec<&str> = [
    ("transform", raw.transform.is_some()),
    ("load", raw.load.is_some()),
    ("resolveId", raw.resolve_id.is_some()),
    ("resolveExternal", raw.resolve_external.is_some()),
  ]
  .iter()
  .filter(|(_, present)| *present)
  .map(|(name, _)| *name)
  .collect();
  if !removed.is_empty() {
    return Err(BundleError::new(
      ErrorCode::UnsupportedLegacyOption,
      format!(
        "The {} option{} no longer supported at the top level - please use plugins to provide these hooks.",
        removed.join(", "),
        if removed.len() == 1 { " is" } else { "s are" }
      ),
    ));
  }

  let on_warn = raw.onwarn.clone().unwrap_or_else(default_on_warn);

  let mut renamed: Vec<(&str, &str)> = Vec::new();
  if let Some(entry) = raw.entry.take() {
    renamed.push(("entry", "input"));
    if raw.input.is_none() {
      raw.input = Some(InputSpec::Single(entry));
    }
  }
  if !renamed.is_empty() {
    on_warn(deprecated_options_warning(&renamed));
  }

  let input = raw.input.take().map(InputSpec::into_items).unwrap_or_default();
  if input.is_empty() {
    return Err(BundleError::new(ErrorCode::MissingOption, "You must supply options.input"));
  }

  let inline_dynamic_imports = raw.inline_dynamic_imports.unwrap_or(false);
  let preserve_modules = raw.preserve_modules.unwrap_or(false);
  let optimize_chunks = raw.optimize_chunks.unwrap_or(false);

  if inline_dynamic_imports {
    if raw.manual_chunks.is_some() {
      return Err(invalid("options.manualChunks is not supported for inlineDynamicImports."));
    }
    if optimize_chunks {
      return Err(invalid("options.optimizeChunks is not supported for inlineDynamicImports."));
    }
    if input.len() > 1 {
      return Err(invalid("Multiple inputs are not supported for inlineDynamicImports."));
    }
  }
  if preserve_modules {
    if inline_dynamic_imports {
      return Err(invalid("preserveModules does not support the inlineDynamicImports option."));
    }
    if raw.manual_chunks.is_some() {
      return Err(invalid("preserveModules does not support the manualChunks option."));
    }
    if optimize_chunks {
      return Err(invalid("preserveModules does not support the optimizeChunks option."));
    }
  }

  Ok(NormalizedInputOptions {
    input,
    plugins: raw.plugins,
    external: raw.external.unwrap_or_default(),
    treeshake: raw.treeshake.unwrap_or(true),
    cache: raw.cache,
    context: raw.context.unwrap_or_else(|| "undefined".to_string()),
    manual_chunks: raw.manual_chunks,
    preserve_modules,
    inline_dynamic_imports,
    optimize_chunks,
    chunk_grouping_size: raw.chunk_grouping_size.unwrap_or(CHUNK_GROUPING_SIZE),
    prefer_const: raw.prefer_const.unwrap_or(false),
    perf: raw.perf.unwrap_or(false),
    shim_missing_exports: raw.shim_missing_exports.unwrap_or(false),
    on_warn,
    watcher: raw.watcher,
    output: raw.output.unwrap_or_default(),
  })
}

/// Merges a per-generate output configuration over the config-level
/// fallback, applies renames, and validates. Checks that need the actual
/// chunk count live in `utils::chunk::validate_output`.
pub fn normalize_output_options(
  input: &NormalizedInputOptions,
  raw: &OutputOptions,
) -> BuildResult<NormalizedOutputOptions> {
  let mut merged = raw.clone().merged_over(&input.output);

  let mut renamed: Vec<(&str, &str)> = Vec::new();
  if let Some(dest) = merged.dest.take() {
    renamed.push(("dest", "output.file"));
    if merged.file.is_none() {
      merged.file = Some(dest);
    }
  }
  if let Some(module_name) = merged.module_name.take() {
    renamed.push(("moduleName", "output.name"));
    if merged.name.is_none() {
      merged.name = Some(module_name);
    }
  }
  if merged.module_id.is_some() {
    if merged.amd.is_some() {
      return Err(BundleError::new(
        ErrorCode::ConflictingOption,
        "Cannot use both \"moduleId\" and \"amd\" - please only use \"amd.id\".",
      ));
    }
    renamed.push(("moduleId", "amd.id"));
    merged.amd = Some(AmdOptions { id: merged.module_id.take(), define: None });
  }
  if !renamed.is_empty() {
    (input.on_warn)(deprecated_options_warning(&renamed));
  }

  let format = match merged.format.as_deref() {
    None => {
      return Err(BundleError::new(
        ErrorCode::FormatRequired,
        "You must specify \"output.format\", which can be one of \"amd\", \"cjs\", \"system\", \"es\", \"iife\" or \"umd\".",
      ));
    }
    Some("es6") => {
      return Err(BundleError::new(
        ErrorCode::FormatDeprecated,
        "The \"es6\" output format is deprecated - use \"es\" instead.",
      ));
    }
    Some(value) => OutputFormat::parse(value).ok_or_else(|| {
      BundleError::new(
        ErrorCode::UnknownOption,
        format!(
          "Invalid value \"{value}\" for option \"output.format\" - valid values are \"amd\", \"cjs\", \"system\", \"es\", \"iife\" and \"umd\"."
        ),
      )
    })?,
  };

  let exports = match merged.exports.as_deref() {
    None => OutputExports::Auto,
    Some(value) => OutputExports::parse(value).ok_or_else(|| {
      BundleError::new(
        ErrorCode::UnknownOption,
        format!(
          "Invalid value \"{value}\" for option \"output.exports\" - valid values are \"auto\", \"default\", \"named\" and \"none\"."
        ),
      )
    })?,
  };

  if merged.file.is_some() && merged.dir.is_some() {
    return Err(invalid(
      "You must set either \"output.file\" for a single-file build or \"output.dir\" when generating multiple chunks.",
    ));
  }

  Ok(NormalizedOutputOptions {
    format,
    file: merged.file,
    dir: merged.dir,
    name: merged.name,
    globals: merged.globals.unwrap_or_default(),
    entry_filenames: merged.entry_filenames.unwrap_or_else(|| "[name].js".to_string()),
    chunk_filenames: merged.chunk_filenames.unwrap_or_else(|| "[name]-[hash].js".to_string()),
    asset_filenames: merged
      .asset_filenames
      .unwrap_or_else(|| "assets/[name]-[hash][extname]".to_string()),
    sourcemap: merged.sourcemap,
    sourcemap_file: merged.sourcemap_file,
    exports,
    amd: merged.amd.unwrap_or_default(),
    banner: merged.banner,
    footer: merged.footer,
    intro: merged.intro,
    outro: merged.outro,
    compact: merged.compact.unwrap_or(false),
    indent: merged.indent.unwrap_or(true),
    strict: merged.strict.unwrap_or(true),
    freeze: merged.freeze.unwrap_or(true),
    es_module: merged.es_module.unwrap_or(true),
    namespace_to_string_tag: merged.namespace_to_string_tag.unwrap_or(false),
    interop: merged.interop.unwrap_or(true),
    extend: merged.extend.unwrap_or(false),
  })
}
