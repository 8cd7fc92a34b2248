//! Miscellaneous

mod env_vars;
mod lease;

pub use env_vars::{EnvVars, FromVars};
pub use lease::Lease;

/// Index of the first occurrence of `byte` in `bytes`.
#[inline]
pub fn bytes_pos1(bytes: &[u8], byte: u8) -> Option<usize> {
  #[cfg(feature = "memchr")]
  return memchr::memchr(byte, bytes);
  #[cfg(not(feature = "memchr"))]
  return bytes.iter().position(|elem| *elem == byte);
}

/// Splits `str` around the first occurrence of the ASCII `byte`.
#[inline]
pub fn str_split_once1(str: &str, byte: u8) -> Option<(&str, &str)> {
  let idx = bytes_pos1(str.as_bytes(), byte)?;
  Some((str.get(..idx)?, str.get(idx.wrapping_add(1)..)?))
}

/// A tracing register with optioned parameters.
#[cfg(feature = "_tracing-tree")]
pub fn tracing_tree_init(fallback_opt: Option<&str>) -> crate::Result<()> {
  use tracing_subscriber::{
    EnvFilter, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
  };
  let fallback = fallback_opt.unwrap_or("");
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  let tracing_tree = tracing_tree::HierarchicalLayer::default()
    .with_deferred_spans(true)
    .with_indent_amount(2)
    .with_indent_lines(true)
    .with_targets(true)
    .with_thread_ids(true)
    .with_thread_names(true)
    .with_verbose_entry(false)
    .with_verbose_exit(false)
    .with_writer(std::io::stderr);
  tracing_subscriber::Registry::default().with(env_filter).with(tracing_tree).try_init()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::misc::{bytes_pos1, str_split_once1};

  #[test]
  fn bytes_pos1_finds_first_occurrence() {
    assert_eq!(bytes_pos1(b"/a?b=1?c", b'?'), Some(2));
    assert_eq!(bytes_pos1(b"/a/b", b'?'), None);
    assert_eq!(bytes_pos1(b"", b'?'), None);
  }

  #[test]
  fn str_split_once1_splits_around_first_byte() {
    assert_eq!(str_split_once1("KEY=a=b", b'='), Some(("KEY", "a=b")));
    assert_eq!(str_split_once1("KEY=", b'='), Some(("KEY", "")));
    assert_eq!(str_split_once1("KEY", b'='), None);
  }
}
