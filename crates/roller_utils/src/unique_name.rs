/// Disambiguates a candidate filename against names already taken, by
/// inserting a numeric suffix before the extension: `app.js`, `app2.js`,
/// `app3.js`, …
pub fn make_unique(candidate: &str, taken: impl Fn(&str) -> bool) -> String {
  if !taken(candidate) {
    return candidate.to_string();
  }

  let (stem, ext) = match candidate.rfind('.') {
    Some(dot) if dot > candidate.rfind('/').map_or(0, |slash| slash + 1) => {
      candidate.split_at(dot)
    }
    _ => (candidate, ""),
  };

  let mut count = 2u32;
  loop {
    let next = format!("{stem}{count}{ext}");
    if !taken(&next) {
      return next;
    }
    count += 1;
  }
}
