/// How source maps are carried: as a sibling `.map` file or embedded in a
/// trailing data URL comment. Absence of a value means maps are off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMapType {
  File,
  Inline,
}
