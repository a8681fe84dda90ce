use std::path::Path;

use async_trait::async_trait;
use roller_common::{NormalizedOutputOptions, OutputExports, OutputFormat, RenderedModule};
use roller_error::BuildResult;
use roller_sourcemap::SourceMap;
use roller_utils::xxhash::xxhash_hex;
use rustc_hash::FxHashMap;

use crate::chunk::{Addons, Chunk, RenderedChunkContent};
use crate::plugin::{PluginContext, PluginDriver};

/// Chunk produced by the flat graph: a single entry module, rendered with a
/// minimal per-format wrapper. Real format finalization belongs to a real
/// graph collaborator.
#[derive(Debug)]
pub struct EntryChunk {
  name: Option<String>,
  id: String,
  code: String,
  exports: Vec<String>,
  export_mode: OutputExports,
  filename: Option<String>,
  rendered_length: usize,
}

impl EntryChunk {
  pub fn new(name: Option<String>, id: String, code: String) -> Self {
    let exports = scan_exports(&code);
    Self {
      name,
      id,
      code,
      exports,
      export_mode: OutputExports::Auto,
      filename: None,
      rendered_length: 0,
    }
  }
}

#[async_trait]
impl Chunk for EntryChunk {
  fn is_entry(&self) -> bool {
    true
  }

  fn is_entry_module_facade(&self) -> bool {
    true
  }

  fn entry_module_id(&self) -> Option<&str> {
    Some(&self.id)
  }

  fn name_hint(&self) -> Option<&str> {
    self.name.as_deref()
  }

  fn get_export_names(&self) -> Vec<String> {
    self.exports.clone()
  }

  fn set_export_mode(&mut self, mode: OutputExports) {
    self.export_mode = mode;
  }

  fn pre_render(&mut self, _options: &NormalizedOutputOptions, _input_base: &Path) -> BuildResult<()> {
    Ok(())
  }

  fn rendered_hash(&self) -> String {
    xxhash_hex(self.code.as_bytes())
  }

  fn filename(&self) -> Option<&str> {
    self.filename.as_deref()
  }

  fn reset_filename(&mut self) {
    self.filename = None;
  }

  fn assign_filename(&mut self, filename: String) {
    self.filename = Some(filename);
  }

  async fn render(
    &mut self,
    options: &NormalizedOutputOptions,
    addons: &Addons,
    driver: &PluginDriver,
    ctx: &PluginContext,
  ) -> BuildResult<RenderedChunkContent> {
    let body = wrap_format(&self.code, options);

    let mut parts = Vec::new();
    for part in [&addons.banner, &addons.intro] {
      if !part.is_empty() {
        parts.push(part.clone());
      }
    }
    parts.push(body);
    for part in [&addons.outro, &addons.footer] {
      if !part.is_empty() {
        parts.push(part.clone());
      }
    }
    let separator = if options.compact { "" } else { "\n" };
    let assembled = parts.join(separator);

    let code = driver.transform_chunk(ctx, assembled, options).await?;
    self.rendered_length = code.len();

    let map = options.sourcemap.map(|_| {
      let file = options
        .sourcemap_file
        .as_deref()
        .map(|path| {
          Path::new(path).file_name().map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| self.filename.clone())
        .unwrap_or_default();
      let mut map = SourceMap::new(vec![self.id.clone()], String::new()).with_file(file);
      map.sources_content = Some(vec![Some(self.code.clone())]);
      map
    });

    Ok(RenderedChunkContent { code, map })
  }

  fn rendered_modules(&self) -> FxHashMap<String, RenderedModule> {
    let mut modules = FxHashMap::default();
    modules.insert(
      self.id.clone(),
      RenderedModule {
        original_length: self.code.len(),
        rendered_length: self.rendered_length,
        rendered_exports: self.exports.clone(),
        removed_exports: Vec::new(),
      },
    );
    modules
  }
}

/// Minimal textual wrapper per target format. Keeps the module body
/// untouched; semantic export rewriting is a real finalizer's business.
fn wrap_format(body: &str, options: &NormalizedOutputOptions) -> String {
  let strict_prologue = if options.strict { "'use strict';\n\n" } else { "" };
  match options.format {
    OutputFormat::Esm => body.to_string(),
    OutputFormat::Cjs => format!("{strict_prologue}{body}"),
    OutputFormat::Iife => {
      let assignment =
        options.name.as_deref().map(|name| format!("var {name} = ")).unwrap_or_default();
      format!("{assignment}(function () {{\n{strict_prologue}{body}\n}}());")
    }
    OutputFormat::Umd => {
      let name = options.name.as_deref().unwrap_or("bundle");
      format!(
        "(function (global, factory) {{\n\
         typeof exports === 'object' && typeof module !== 'undefined' ? factory(exports) :\n\
         typeof define === 'function' && define.amd ? define(['exports'], factory) :\n\
         (global = global || self, factory(global.{name} = {{}}));\n\
         }}(this, function (exports) {{\n{strict_prologue}{body}\n}}));"
      )
    }
    OutputFormat::Amd => {
      let define = options.amd.define_name();
      let id = options
        .amd
        .id
        .as_deref()
        .map(|id| format!("'{id}', "))
        .unwrap_or_default();
      format!("{define}({id}function () {{\n{strict_prologue}{body}\n}});")
    }
    OutputFormat::System => {
      format!(
        "System.register([], function (exports) {{\n{strict_prologue}return {{\nexecute: function () {{\n{body}\n}}\n}};\n}});"
      )
    }
  }
}

/// Line-level scan for the export surface. Good enough to drive export-mode
/// decisions for entry facades; not a parser.
fn scan_exports(code: &str) -> Vec<String> {
  let mut exports = Vec::new();
  let mut push = |name: String| {
    if !name.is_empty() && !exports.contains(&name) {
      exports.push(name);
    }
  };

  for line in code.lines() {
    let Some(rest) = line.trim_start().strip_prefix("export ") else {
      continue;
    };
    let rest = rest.trim_start();

    if rest.starts_with("default") {
      push("default".to_string());
    } else if let Some(list) = rest.strip_prefix('{') {
      let Some(end) = list.find('}') else { continue };
      for entry in list[..end].split(',') {
        let entry = entry.trim();
        let exported = entry.rsplit(" as ").next().unwrap_or(entry).trim();
        push(identifier_prefix(exported));
      }
    } else {
      let mut tokens = rest.split_whitespace();
      let name = match tokens.next() {
        Some("const" | "let" | "var" | "function" | "class") => tokens.next(),
        Some("async") => match tokens.next() {
          Some("function") => tokens.next(),
          _ => None,
        },
        _ => None,
      };
      if let Some(name) = name {
        push(identifier_prefix(name));
      }
    }
  }
  exports
}

fn identifier_prefix(token: &str) -> String {
  token
    .chars()
    .take_while(|char| char.is_ascii_alphanumeric() || matches!(char, '_' | '$'))
    .collect()
}
