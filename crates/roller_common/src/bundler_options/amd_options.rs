/// AMD output configuration: the module id passed to `define` and the name
/// of the `define` function itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmdOptions {
  pub id: Option<String>,
  pub define: Option<String>,
}

impl AmdOptions {
  pub fn define_name(&self) -> &str {
    self.define.as_deref().unwrap_or("define")
  }
}
