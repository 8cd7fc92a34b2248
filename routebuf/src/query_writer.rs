use crate::{
  UriBuffer,
  de::{AsciiSet, PercentEncode},
};
use alloc::string::String;
use core::fmt::{Display, Write};

/// Query parameters need special handling because of the initial `?`.
///
/// The first parameter is prefixed with `?` unless the URI already has a query, in which case
/// `&` is used. Names and values are percent-encoded with [`AsciiSet::QUERY_COMPONENT`].
#[derive(Debug)]
pub struct QueryWriter<'buffer> {
  buffer: &'buffer mut UriBuffer,
}

impl<'buffer> QueryWriter<'buffer> {
  pub(crate) fn new(buffer: &'buffer mut UriBuffer) -> Self {
    Self { buffer }
  }

  /// Writes `?name=value` or `&name=value`.
  #[inline]
  pub fn write<T>(self, name: &str, value: T) -> crate::Result<Self>
  where
    T: Display,
  {
    self.buffer.write_query_param(|uri| {
      encode_component(uri, name);
      uri.push('=');
      write!(EncodeWriter { uri }, "{value}")?;
      Ok(())
    })?;
    Ok(self)
  }

  /// Same as [`Self::write`] but for optional fields.
  #[inline]
  pub fn write_opt<T>(self, name: &str, opt: Option<T>) -> crate::Result<Self>
  where
    T: Display,
  {
    if let Some(value) = opt { self.write(name, value) } else { Ok(self) }
  }

  /// Same as [`Self::write`] but `value` is written as-is, which is useful for values that were
  /// already encoded.
  #[inline]
  pub fn write_raw(self, name: &str, value: &str) -> crate::Result<Self> {
    self.buffer.write_query_param(|uri| {
      encode_component(uri, name);
      uri.push('=');
      uri.push_str(value);
      Ok(())
    })?;
    Ok(self)
  }
}

struct EncodeWriter<'uri> {
  uri: &'uri mut String,
}

impl Write for EncodeWriter<'_> {
  #[inline]
  fn write_str(&mut self, s: &str) -> core::fmt::Result {
    encode_component(self.uri, s);
    Ok(())
  }
}

fn encode_component(uri: &mut String, component: &str) {
  PercentEncode::new(component.as_bytes(), AsciiSet::QUERY_COMPONENT).encode_into(uri);
}

#[cfg(test)]
mod tests {
  use crate::{BufferValue, Error, UriBuffer, UriBufferError, UriBufferParams};
  use core::fmt::{Display, Formatter};

  struct Failing;

  impl Display for Failing {
    fn fmt(&self, _: &mut Formatter<'_>) -> core::fmt::Result {
      Err(core::fmt::Error)
    }
  }

  #[test]
  fn existing_query_is_continued() {
    let mut uri = UriBuffer::with_base("/search?lang=en", UriBufferParams::default()).unwrap();
    let _ = uri.query_writer().write("q", "rust & go").unwrap();
    assert_eq!(uri.as_str(), "/search?lang=en&q=rust%20%26%20go");
  }

  #[test]
  fn first_parameter_starts_the_query() {
    let mut uri = UriBuffer::new(UriBufferParams::default());
    uri.accept(BufferValue::new("/items", false)).unwrap();
    uri.buffer(BufferValue::new("/", false)).unwrap();
    let _ = uri
      .query_writer()
      .write("page", 2)
      .unwrap()
      .write_opt("sort", None::<&str>)
      .unwrap()
      .write_opt("a=b", Some("c?d"))
      .unwrap()
      .write_raw("raw", "x%2By")
      .unwrap();
    assert_eq!(uri.as_str(), "/items?page=2&a%3Db=c%3Fd&raw=x%2By");
    assert_eq!(uri.query(), "?page=2&a%3Db=c%3Fd&raw=x%2By");
    assert!(uri.pending().is_empty());
  }

  #[test]
  fn failures_leave_the_uri_untouched() {
    let mut uri = UriBuffer::new(UriBufferParams::default().set_max_len(12));
    let _ = uri.query_writer().write("a", 1).unwrap();
    assert!(matches!(
      uri.query_writer().write("long", "value"),
      Err(Error::UriBufferError(UriBufferError::UriIsTooLarge { max_len: 12 }))
    ));
    assert!(matches!(uri.query_writer().write("b", Failing), Err(Error::Fmt(_))));
    assert_eq!(uri.as_str(), "?a=1");
    let mut uri = UriBuffer::new(UriBufferParams::default().set_max_len(4));
    assert!(uri.query_writer().write("ab", 1).is_err());
    assert_eq!(uri.query(), "");
    let _ = uri.query_writer().write("a", 1).unwrap();
    assert_eq!(uri.as_str(), "?a=1");
  }
}
