//! URL encoding

#![no_main]

use routebuf::de::{AsciiSet, PercentEncode};

libfuzzer_sys::fuzz_target!(|data: (Vec<u8>, u8)| {
  let (bytes, removed) = data;
  let set = AsciiSet::PATH_SEGMENT.remove(removed);
  let mut encoded = String::new();
  PercentEncode::new(&bytes, set).encode_into(&mut encoded);
  assert!(encoded.is_ascii());
  let mut restored = Vec::with_capacity(bytes.len());
  let mut iter = encoded.as_bytes().iter().copied();
  while let Some(byte) = iter.next() {
    if byte == b'%' && set.contains(b'%') {
      let (Some(high), Some(low)) = (iter.next(), iter.next()) else {
        panic!("truncated escape");
      };
      let hex = [high, low];
      let Ok(hex_str) = core::str::from_utf8(&hex) else {
        panic!("non-ASCII escape");
      };
      let Ok(decoded) = u8::from_str_radix(hex_str, 16) else {
        panic!("invalid escape");
      };
      restored.push(decoded);
    } else {
      restored.push(byte);
    }
  }
  if set.contains(b'%') {
    assert_eq!(restored, bytes);
  }
});
