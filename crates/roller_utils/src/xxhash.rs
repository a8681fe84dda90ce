use xxhash_rust::xxh3::xxh3_128;

pub fn xxhash_hex(input: &[u8]) -> String {
  format!("{:032x}", xxh3_128(input))
}

/// First eight hex characters of the content hash, the width `[hash]`
/// placeholders expand to.
pub fn xxhash_short(input: &[u8]) -> String {
  let mut hash = xxhash_hex(input);
  hash.truncate(8);
  hash
}

#[test]
fn test_xxhash_hex() {
  assert_eq!(xxhash_hex(b"hello").len(), 32);
  assert_eq!(xxhash_short(b"hello"), &xxhash_hex(b"hello")[..8]);
  assert_ne!(xxhash_short(b"hello"), xxhash_short(b"hello!"));
}
