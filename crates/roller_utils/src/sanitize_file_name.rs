pub fn sanitize_file_name(name: &str) -> String {
  name
    .chars()
    .map(|char| {
      if char.is_ascii_alphanumeric() || matches!(char, '-' | '_' | '.') {
        char
      } else {
        '_'
      }
    })
    .collect()
}

#[test]
fn test_sanitize_file_name() {
  assert_eq!(sanitize_file_name("logo.png"), "logo.png");
  assert_eq!(sanitize_file_name("a b/c\0d"), "a_b_c_d");
}
