/// Export mode of an entry chunk facade. `Auto` is resolved against the
/// facade's actual exports during generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputExports {
  #[default]
  Auto,
  Default,
  Named,
  None,
}

impl OutputExports {
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "auto" => Some(Self::Auto),
      "default" => Some(Self::Default),
      "named" => Some(Self::Named),
      "none" => Some(Self::None),
      _ => None,
    }
  }
}
