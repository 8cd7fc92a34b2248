use crate::{
  BufferValue, BufferValueRef, BufferValueString, QueryWriter, UriBufferError, UriBufferParams,
  de::{AsciiSet, PercentEncode},
  misc::{Lease, bytes_pos1},
};
use alloc::{string::String, vec::Vec};
use core::fmt::{Display, Formatter};

/// Assembles an URI out of [`BufferValue`]s.
///
/// Fragments can be buffered, which means that they are only written once something else is
/// accepted after them, or accepted, which means that they are written right away along with all
/// previously buffered fragments. Fragments that require encoding are percent-encoded on the way.
///
/// ```rust
/// use routebuf::{BufferValue, UriBuffer, UriBufferParams};
/// let mut uri = UriBuffer::with_base("https://example.com", UriBufferParams::default()).unwrap();
/// uri.push_segment("docs").unwrap();
/// uri.buffer(BufferValue::new("/", false)).unwrap();
/// uri.accept(BufferValue::new("a b", true)).unwrap();
/// uri.query_writer().write("page", 2).unwrap();
/// assert_eq!(uri.as_str(), "https://example.com/docs/a%20b?page=2");
/// ```
#[derive(Clone, Debug, Default)]
pub struct UriBuffer {
  base_len: usize,
  params: UriBufferParams,
  pending: Vec<BufferValueString>,
  query_start: Option<usize>,
  uri: String,
}

impl UriBuffer {
  /// Empty instance
  #[inline]
  pub const fn new(params: UriBufferParams) -> Self {
    Self { base_len: 0, params, pending: Vec::new(), query_start: None, uri: String::new() }
  }

  /// Instance that starts with `base`, which is written as-is.
  #[inline]
  pub fn with_base(base: &str, params: UriBufferParams) -> crate::Result<Self> {
    if base.len() > params.max_len() {
      return Err(UriBufferError::UriIsTooLarge { max_len: params.max_len() }.into());
    }
    Ok(Self {
      base_len: base.len(),
      params,
      pending: Vec::new(),
      query_start: bytes_pos1(base.as_bytes(), b'?'),
      uri: base.into(),
    })
  }

  /// Writes all buffered fragments followed by `value`.
  ///
  /// Nothing is modified if an error is returned.
  #[inline]
  pub fn accept<S>(&mut self, value: BufferValue<S>) -> crate::Result<()>
  where
    S: Lease<str>,
  {
    self.flush_with(|uri, ascii_set| write_value(uri, ascii_set, value.to_ref()))
  }

  /// The URI written so far. Buffered fragments are not included.
  #[inline]
  pub fn as_str(&self) -> &str {
    &self.uri
  }

  /// Defers the writing of `value` until the next accepted fragment.
  #[inline]
  pub fn buffer<S>(&mut self, value: BufferValue<S>) -> crate::Result<()>
  where
    S: Lease<str>,
  {
    if self.query_start.is_some() {
      return Err(UriBufferError::QueryAlreadyStarted.into());
    }
    if self.pending.len() >= self.params.max_pending() {
      return Err(
        UriBufferError::TooManyPendingValues { max_pending: self.params.max_pending() }.into(),
      );
    }
    _trace!("Buffering `{}`", value.value());
    self.pending.push(value.to_string());
    Ok(())
  }

  /// Removes all content, including the base URI.
  #[inline]
  pub fn clear(&mut self) {
    let Self { base_len, params: _, pending, query_start, uri } = self;
    *base_len = 0;
    pending.clear();
    *query_start = None;
    uri.clear();
  }

  /// Drops all buffered fragments without writing them. Returns the number of dropped elements.
  #[inline]
  pub fn discard_pending(&mut self) -> usize {
    let len = self.pending.len();
    if len > 0 {
      _trace!("Discarding {len} pending value(s)");
    }
    self.pending.clear();
    len
  }

  /// Applies the transformations dictated by [`UriBufferParams`] and returns the final URI.
  ///
  /// Buffered fragments are discarded.
  #[inline]
  pub fn finish(mut self) -> crate::Result<String> {
    let _ = self.discard_pending();
    let mut query_start = self.query_start.unwrap_or(self.uri.len());
    if self.params.append_trailing_slash() {
      let path = self.uri.get(..query_start).unwrap_or_default();
      if !path.is_empty() && !path.ends_with('/') {
        self.uri.insert(query_start, '/');
        self.check_len()?;
        query_start = query_start.wrapping_add(1);
      }
    }
    if self.params.lowercase_urls() {
      if let Some(path) = self.uri.get_mut(..query_start) {
        path.make_ascii_lowercase();
      }
      if self.params.lowercase_query_strings() {
        if let Some(query) = self.uri.get_mut(query_start..) {
          query.make_ascii_lowercase();
        }
      }
    }
    Ok(self.uri)
  }

  /// If nothing was written.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.uri.is_empty()
  }

  /// Number of written bytes.
  #[inline]
  pub fn len(&self) -> usize {
    self.uri.len()
  }

  /// See [`UriBufferParams`].
  #[inline]
  pub fn params(&self) -> &UriBufferParams {
    &self.params
  }

  /// Everything before the query.
  #[inline]
  pub fn path(&self) -> &str {
    self.uri.get(..self.query_start.unwrap_or(self.uri.len())).unwrap_or_default()
  }

  /// Buffered fragments that are waiting for the next accepted value.
  #[inline]
  pub fn pending(&self) -> &[BufferValueString] {
    &self.pending
  }

  /// Writes all buffered fragments, a `/` if the result doesn't already end with one and then
  /// the encoded `segment`.
  #[inline]
  pub fn push_segment(&mut self, segment: &str) -> crate::Result<()> {
    self.flush_with(|uri, ascii_set| {
      if !uri.ends_with('/') {
        uri.push('/');
      }
      write_value(uri, ascii_set, BufferValue::new(segment, true));
    })
  }

  /// The query, including the initial `?`. Empty if no query was written.
  #[inline]
  pub fn query(&self) -> &str {
    self.query_start.and_then(|idx| self.uri.get(idx..)).unwrap_or_default()
  }

  /// Starts or continues the query section. Buffered fragments are discarded because path
  /// fragments can not follow a query.
  #[inline]
  pub fn query_writer(&mut self) -> QueryWriter<'_> {
    let _ = self.discard_pending();
    QueryWriter::new(self)
  }

  /// Truncates the internal storage with the length of the base URI created in this instance.
  /// Buffered fragments are discarded.
  #[inline]
  pub fn truncate_with_base(&mut self) {
    let _ = self.discard_pending();
    self.uri.truncate(self.base_len);
    self.query_start = bytes_pos1(self.uri.as_bytes(), b'?');
  }

  // Appends `?` or `&` and lets `cb` write the parameter, rolling everything back on error.
  pub(crate) fn write_query_param(
    &mut self,
    cb: impl FnOnce(&mut String) -> crate::Result<()>,
  ) -> crate::Result<()> {
    let prev_len = self.uri.len();
    let prev_query_start = self.query_start;
    if self.query_start.is_some() {
      self.uri.push('&');
    } else {
      self.query_start = Some(prev_len);
      self.uri.push('?');
    }
    let rslt = cb(&mut self.uri).and_then(|()| self.check_len());
    if rslt.is_err() {
      self.uri.truncate(prev_len);
      self.query_start = prev_query_start;
    }
    rslt
  }

  fn check_len(&self) -> crate::Result<()> {
    let max_len = self.params.max_len();
    if self.uri.len() > max_len {
      _debug!("URI with {} bytes exceeds the limit of {max_len} bytes", self.uri.len());
      return Err(UriBufferError::UriIsTooLarge { max_len }.into());
    }
    Ok(())
  }

  fn flush_with(&mut self, cb: impl FnOnce(&mut String, AsciiSet)) -> crate::Result<()> {
    if self.query_start.is_some() {
      return Err(UriBufferError::QueryAlreadyStarted.into());
    }
    let prev_len = self.uri.len();
    let ascii_set = self.params.path_ascii_set();
    for value in &self.pending {
      write_value(&mut self.uri, ascii_set, value.to_ref());
    }
    cb(&mut self.uri, ascii_set);
    if let Err(err) = self.check_len() {
      self.uri.truncate(prev_len);
      return Err(err);
    }
    self.query_start =
      self.uri.as_bytes().get(prev_len..).and_then(|bytes| bytes_pos1(bytes, b'?')).map(|idx| {
        idx.wrapping_add(prev_len)
      });
    _trace!("Flushed {} pending value(s)", self.pending.len());
    self.pending.clear();
    Ok(())
  }
}

impl Display for UriBuffer {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.write_str(&self.uri)
  }
}

fn write_value(uri: &mut String, ascii_set: AsciiSet, value: BufferValueRef<'_>) {
  if value.requires_encoding() {
    PercentEncode::new(value.value().as_bytes(), ascii_set).encode_into(uri);
  } else {
    uri.push_str(value.value());
  }
}


#[cfg(feature = "_proptest")]
#[cfg(test)]
mod _proptest {
  use crate::{
    BufferValue, UriBuffer, UriBufferParams,
    de::{AsciiSet, PercentEncode},
  };
  use alloc::{string::String, vec::Vec};

  #[test_strategy::proptest]
  fn accepted_output_matches_manual_concatenation(values: Vec<(String, bool)>) {
    let mut uri = UriBuffer::new(UriBufferParams::default().set_max_len(usize::MAX));
    let mut expected = String::new();
    for (value, requires_encoding) in &values {
      if *requires_encoding {
        PercentEncode::new(value.as_bytes(), AsciiSet::PATH_SEGMENT).encode_into(&mut expected);
      } else if value.contains('?') {
        continue;
      } else {
        expected.push_str(value);
      }
      uri.buffer(BufferValue::new(value.as_str(), *requires_encoding)).unwrap();
      if uri.pending().len() == 32 {
        uri.accept(BufferValue::new("", false)).unwrap();
      }
    }
    uri.accept(BufferValue::new("", false)).unwrap();
    assert_eq!(uri.as_str(), expected);
  }
}
