use crate::{de::AsciiSet, misc::FromVars};
use alloc::string::String;

const PREFIX: &str = "ROUTEBUF_";

/// Parameters that guide the assembling of URIs.
///
/// Can also be constructed from environment variables through [`crate::misc::EnvVars`]. Keys are
/// the upper-cased field names prefixed with `ROUTEBUF_`, for example, `ROUTEBUF_MAX_LEN`.
/// Absent keys keep their default values.
///
/// ```rust
/// use routebuf::{UriBufferParams, misc::EnvVars};
/// let params = EnvVars::<UriBufferParams>::from_iterator([
///   ("ROUTEBUF_LOWERCASE_URLS".into(), "true".into()),
///   ("ROUTEBUF_MAX_LEN".into(), "256".into()),
/// ])
/// .unwrap()
/// .finish();
/// assert!(params.lowercase_urls());
/// assert_eq!(params.max_len(), 256);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UriBufferParams {
  append_trailing_slash: bool,
  encode_slashes: bool,
  lowercase_query_strings: bool,
  lowercase_urls: bool,
  max_len: usize,
  max_pending: usize,
}

impl UriBufferParams {
  /// If a trailing slash should be appended to the path of finished URIs.
  ///
  /// Defaults to `false`.
  #[inline]
  pub const fn append_trailing_slash(&self) -> bool {
    self.append_trailing_slash
  }

  /// If slashes of values that require encoding should be encoded. Disabling is useful for
  /// values that represent whole sub-paths.
  ///
  /// Defaults to `true`.
  #[inline]
  pub const fn encode_slashes(&self) -> bool {
    self.encode_slashes
  }

  /// If the query of finished URIs should be lower-cased. Only applies when
  /// [`Self::lowercase_urls`] is also enabled.
  ///
  /// Defaults to `false`.
  #[inline]
  pub const fn lowercase_query_strings(&self) -> bool {
    self.lowercase_query_strings
  }

  /// If the path of finished URIs should be lower-cased.
  ///
  /// Defaults to `false`.
  #[inline]
  pub const fn lowercase_urls(&self) -> bool {
    self.lowercase_urls
  }

  /// Maximum number of bytes of an URI.
  ///
  /// Defaults to 8192.
  #[inline]
  pub const fn max_len(&self) -> usize {
    self.max_len
  }

  /// Maximum number of buffered fragments that are waiting to be written.
  ///
  /// Defaults to 64.
  #[inline]
  pub const fn max_pending(&self) -> usize {
    self.max_pending
  }

  /// Sets [`Self::append_trailing_slash`].
  #[inline]
  #[must_use]
  pub const fn set_append_trailing_slash(mut self, elem: bool) -> Self {
    self.append_trailing_slash = elem;
    self
  }

  /// Sets [`Self::encode_slashes`].
  #[inline]
  #[must_use]
  pub const fn set_encode_slashes(mut self, elem: bool) -> Self {
    self.encode_slashes = elem;
    self
  }

  /// Sets [`Self::lowercase_query_strings`].
  #[inline]
  #[must_use]
  pub const fn set_lowercase_query_strings(mut self, elem: bool) -> Self {
    self.lowercase_query_strings = elem;
    self
  }

  /// Sets [`Self::lowercase_urls`].
  #[inline]
  #[must_use]
  pub const fn set_lowercase_urls(mut self, elem: bool) -> Self {
    self.lowercase_urls = elem;
    self
  }

  /// Sets [`Self::max_len`].
  #[inline]
  #[must_use]
  pub const fn set_max_len(mut self, elem: usize) -> Self {
    self.max_len = elem;
    self
  }

  /// Sets [`Self::max_pending`].
  #[inline]
  #[must_use]
  pub const fn set_max_pending(mut self, elem: usize) -> Self {
    self.max_pending = elem;
    self
  }

  pub(crate) fn path_ascii_set(&self) -> AsciiSet {
    if self.encode_slashes {
      AsciiSet::PATH_SEGMENT
    } else {
      AsciiSet::PATH_SEGMENT.remove(b'/')
    }
  }
}

impl Default for UriBufferParams {
  #[inline]
  fn default() -> Self {
    Self {
      append_trailing_slash: false,
      encode_slashes: true,
      lowercase_query_strings: false,
      lowercase_urls: false,
      max_len: 8 * 1024,
      max_pending: 64,
    }
  }
}

impl FromVars for UriBufferParams {
  #[inline]
  fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> crate::Result<Self> {
    let mut this = Self::default();
    for (key, value) in vars {
      let Some(name) = key.strip_prefix(PREFIX) else {
        continue;
      };
      match name {
        "APPEND_TRAILING_SLASH" => this.append_trailing_slash = parse_bool(&value)?,
        "ENCODE_SLASHES" => this.encode_slashes = parse_bool(&value)?,
        "LOWERCASE_QUERY_STRINGS" => this.lowercase_query_strings = parse_bool(&value)?,
        "LOWERCASE_URLS" => this.lowercase_urls = parse_bool(&value)?,
        "MAX_LEN" => this.max_len = parse_usize(&value)?,
        "MAX_PENDING" => this.max_pending = parse_usize(&value)?,
        _ => {
          _debug!("Ignoring unknown variable `{key}`");
        }
      }
    }
    Ok(this)
  }
}

fn parse_bool(value: &str) -> crate::Result<bool> {
  Ok(match value.trim() {
    "1" | "true" | "TRUE" | "True" => true,
    "0" | "false" | "FALSE" | "False" => false,
    other => return Err(crate::Error::UnexpectedString { length: other.len() }),
  })
}

// Accepts `_` as a digit separator, e.g., `8_192`.
fn parse_usize(value: &str) -> crate::Result<usize> {
  Ok(value.trim().replace('_', "").parse::<usize>()?)
}

#[cfg(test)]
mod tests {
  use crate::{Error, UriBufferParams, de::AsciiSet, misc::EnvVars};
  use alloc::string::String;

  fn vars<const N: usize>(pairs: [(&str, &str); N]) -> impl Iterator<Item = (String, String)> {
    pairs.into_iter().map(|(key, value)| (key.into(), value.into()))
  }

  #[test]
  fn absent_variables_keep_defaults() {
    let params = EnvVars::<UriBufferParams>::from_iterator(vars([("PATH", "/usr/bin")]))
      .unwrap()
      .finish();
    assert_eq!(params, UriBufferParams::default());
  }

  #[cfg(feature = "std")]
  #[test]
  fn env_data_is_parsed() {
    let data = b"ROUTEBUF_APPEND_TRAILING_SLASH=1\n\
      ROUTEBUF_ENCODE_SLASHES=false\n\
      ROUTEBUF_MAX_PENDING='8'\n\
      ROUTEBUF_MAX_LEN=8_192\n\
      ROUTEBUF_UNKNOWN=1";
    let params = EnvVars::<UriBufferParams>::from_env_data(data).unwrap().finish();
    assert_eq!(
      params,
      UriBufferParams::default()
        .set_append_trailing_slash(true)
        .set_encode_slashes(false)
        .set_max_len(8192)
        .set_max_pending(8)
    );
  }

  #[test]
  fn invalid_values_are_rejected() {
    assert!(matches!(
      EnvVars::<UriBufferParams>::from_iterator(vars([("ROUTEBUF_LOWERCASE_URLS", "yes")])),
      Err(Error::UnexpectedString { length: 3 })
    ));
    assert!(matches!(
      EnvVars::<UriBufferParams>::from_iterator(vars([("ROUTEBUF_MAX_LEN", "-1")])),
      Err(Error::ParseIntError(_))
    ));
  }

  #[test]
  fn slashes_are_kept_when_not_encoded() {
    let params = UriBufferParams::default();
    assert!(params.path_ascii_set().contains(b'/'));
    assert_eq!(
      params.set_encode_slashes(false).path_ascii_set(),
      AsciiSet::PATH_SEGMENT.remove(b'/')
    );
  }

  #[cfg(feature = "serde")]
  #[test]
  fn serde_fills_missing_fields_with_defaults() {
    let params: UriBufferParams = serde_json::from_str(r#"{"lowercase_urls":true}"#).unwrap();
    assert_eq!(params, UriBufferParams::default().set_lowercase_urls(true));
  }
}
