/// Pattern over the `[name]`, `[hash]`, `[ext]`, `[extname]`, and
/// `[format]` placeholders used for chunk and asset filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
  template: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileNameRenderOptions<'a> {
  pub name: Option<&'a str>,
  pub hash: Option<&'a str>,
  pub ext: Option<&'a str>,
  pub format: Option<&'a str>,
}

impl FilenameTemplate {
  pub fn new(template: impl Into<String>) -> Self {
    Self { template: template.into() }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn has_hash_pattern(&self) -> bool {
    self.template.contains("[hash]")
  }

  pub fn render(&self, options: &FileNameRenderOptions) -> String {
    let mut rendered = self.template.clone();
    if let Some(name) = options.name {
      rendered = rendered.replace("[name]", name);
    }
    if let Some(hash) = options.hash {
      rendered = rendered.replace("[hash]", hash);
    }
    if let Some(format) = options.format {
      rendered = rendered.replace("[format]", format);
    }
    // [extname] carries the dot, [ext] does not; both collapse to nothing
    // for extension-less names.
    let ext = options.ext.unwrap_or("");
    rendered = rendered.replace("[extname]", &if ext.is_empty() {
      String::new()
    } else {
      format!(".{ext}")
    });
    rendered.replace("[ext]", ext)
  }
}

impl From<&str> for FilenameTemplate {
  fn from(template: &str) -> Self {
    Self::new(template)
  }
}
