use alloc::string::String;

const ASCII_RANGE_LEN: usize = 128;
const BITS_PER_CHUNK: usize = 32;

/// Characters or bytes in the ASCII range.
///
/// Bytes outside the ASCII range are always encoded regardless of the set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AsciiSet {
  mask: [u32; ASCII_RANGE_LEN / BITS_PER_CHUNK],
}

impl AsciiSet {
  /// Everything but the unreserved characters (`ALPHA / DIGIT / "-" / "." / "_" / "~"`).
  ///
  /// <https://datatracker.ietf.org/doc/html/rfc3986#section-2.3>
  pub const PATH_SEGMENT: AsciiSet =
    AsciiSet { mask: [u32::MAX, 4_227_899_391, 2_013_265_921, 3_087_007_745] };

  /// Names and values of query parameters. Same as [`Self::PATH_SEGMENT`], which also covers `&`,
  /// `=` and `+`.
  pub const QUERY_COMPONENT: AsciiSet = Self::PATH_SEGMENT;

  /// Adds a character into the set.
  #[inline]
  #[must_use]
  pub fn insert(self, byte: u8) -> Self {
    let mut mask = self.mask;
    let byte_usize = usize::from(byte);
    let idx = byte_usize / BITS_PER_CHUNK;
    if let Some(elem) = mask.get_mut(idx) {
      *elem |= 1 << (byte_usize % BITS_PER_CHUNK);
    }
    Self { mask }
  }

  /// Removes a character from the set.
  #[inline]
  #[must_use]
  pub fn remove(self, byte: u8) -> Self {
    let mut mask = self.mask;
    let byte_usize = usize::from(byte);
    let idx = byte_usize / BITS_PER_CHUNK;
    if let Some(elem) = mask.get_mut(idx) {
      *elem &= !(1 << (byte_usize % BITS_PER_CHUNK));
    }
    Self { mask }
  }

  /// If `byte` is part of the set.
  #[inline]
  pub fn contains(self, byte: u8) -> bool {
    let byte_usize = usize::from(byte);
    let idx = byte_usize / BITS_PER_CHUNK;
    let chunk = self.mask.get(idx).copied().unwrap_or_default();
    let mask = 1 << (byte_usize % BITS_PER_CHUNK);
    (chunk & mask) != 0
  }

  fn should_encode(self, byte: u8) -> bool {
    !byte.is_ascii() || self.contains(byte)
  }
}

/// Percent-encodes bytes, spaces included (`%20`).
///
/// Every yielded chunk is ASCII.
#[derive(Clone, Copy, Debug)]
pub struct PercentEncode<'bytes> {
  ascii_set: AsciiSet,
  bytes: &'bytes [u8],
}

impl<'bytes> PercentEncode<'bytes> {
  /// New instance that will use `ascii_set` to guide which elements should be encoded.
  #[inline]
  pub const fn new(bytes: &'bytes [u8], ascii_set: AsciiSet) -> Self {
    Self { ascii_set, bytes }
  }

  /// Appends all encoded chunks into `string`.
  #[inline]
  pub fn encode_into(self, string: &mut String) {
    string.reserve(self.bytes.len());
    for chunk in self {
      string.extend(chunk.iter().copied().map(char::from));
    }
  }
}

impl<'bytes> Iterator for PercentEncode<'bytes> {
  type Item = &'bytes [u8];

  #[inline]
  fn next(&mut self) -> Option<&'bytes [u8]> {
    let (&byte, remaining) = self.bytes.split_first()?;
    if self.ascii_set.should_encode(byte) {
      self.bytes = remaining;
      Some(percent_encoded(byte))
    } else {
      for (idx, local_byte) in remaining.iter().copied().enumerate() {
        if self.ascii_set.should_encode(local_byte) {
          let (left, right) = self.bytes.split_at_checked(idx.wrapping_add(1))?;
          self.bytes = right;
          return Some(left);
        }
      }
      let rslt = self.bytes;
      self.bytes = &[][..];
      Some(rslt)
    }
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.bytes.is_empty() { (0, Some(0)) } else { (1, Some(self.bytes.len())) }
  }
}

fn percent_encoded(byte: u8) -> &'static [u8] {
  static TABLE_PERCENT: &[u8; 768] = b"\
    %00%01%02%03%04%05%06%07%08%09%0A%0B%0C%0D%0E%0F\
    %10%11%12%13%14%15%16%17%18%19%1A%1B%1C%1D%1E%1F\
    %20%21%22%23%24%25%26%27%28%29%2A%2B%2C%2D%2E%2F\
    %30%31%32%33%34%35%36%37%38%39%3A%3B%3C%3D%3E%3F\
    %40%41%42%43%44%45%46%47%48%49%4A%4B%4C%4D%4E%4F\
    %50%51%52%53%54%55%56%57%58%59%5A%5B%5C%5D%5E%5F\
    %60%61%62%63%64%65%66%67%68%69%6A%6B%6C%6D%6E%6F\
    %70%71%72%73%74%75%76%77%78%79%7A%7B%7C%7D%7E%7F\
    %80%81%82%83%84%85%86%87%88%89%8A%8B%8C%8D%8E%8F\
    %90%91%92%93%94%95%96%97%98%99%9A%9B%9C%9D%9E%9F\
    %A0%A1%A2%A3%A4%A5%A6%A7%A8%A9%AA%AB%AC%AD%AE%AF\
    %B0%B1%B2%B3%B4%B5%B6%B7%B8%B9%BA%BB%BC%BD%BE%BF\
    %C0%C1%C2%C3%C4%C5%C6%C7%C8%C9%CA%CB%CC%CD%CE%CF\
    %D0%D1%D2%D3%D4%D5%D6%D7%D8%D9%DA%DB%DC%DD%DE%DF\
    %E0%E1%E2%E3%E4%E5%E6%E7%E8%E9%EA%EB%EC%ED%EE%EF\
    %F0%F1%F2%F3%F4%F5%F6%F7%F8%F9%FA%FB%FC%FD%FE%FF\
  ";
  let idx = usize::from(byte).wrapping_mul(3);
  TABLE_PERCENT.get(idx..idx.wrapping_add(3)).unwrap_or_default()
}


#[cfg(feature = "_proptest")]
#[cfg(test)]
mod _proptest {
  use crate::de::{AsciiSet, PercentEncode};
  use alloc::string::String;

  #[test_strategy::proptest]
  fn output_only_has_unreserved_chars_or_escapes(data: String) {
    let mut encoded = String::new();
    PercentEncode::new(data.as_bytes(), AsciiSet::PATH_SEGMENT).encode_into(&mut encoded);
    let mut bytes = encoded.as_bytes();
    let mut unencoded_len: usize = 0;
    while let [first, rest @ ..] = bytes {
      if *first == b'%' {
        let [a, b, after @ ..] = rest else {
          panic!("truncated escape in {encoded}");
        };
        assert!(a.is_ascii_hexdigit() && b.is_ascii_hexdigit());
        bytes = after;
      } else {
        assert!(!AsciiSet::PATH_SEGMENT.contains(*first));
        unencoded_len = unencoded_len.wrapping_add(1);
        bytes = rest;
      }
    }
    let kept = data.bytes().filter(|elem| !AsciiSet::PATH_SEGMENT.contains(*elem) && elem.is_ascii());
    assert_eq!(kept.count(), unencoded_len);
  }
}
