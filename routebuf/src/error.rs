use core::fmt::{Debug, Display, Formatter};

/// Grouped individual errors
#[derive(Debug)]
pub enum Error {
  // External - Misc
  //
  /// See [`tracing_subscriber::util::TryInitError`].
  #[cfg(feature = "_tracing-tree")]
  TryInitError(tracing_subscriber::util::TryInitError),

  // External - Std
  //
  /// See [`core::fmt::Error`].
  Fmt(core::fmt::Error),
  /// See [`std::io::Error`].
  #[cfg(feature = "std")]
  IoError(std::io::Error),
  /// See [`core::num::ParseIntError`].
  ParseIntError(core::num::ParseIntError),

  // Generic
  //
  /// Unexpected String
  UnexpectedString {
    /// Length of the received string
    length: usize,
  },

  // Internal
  //
  /// See [`UriBufferError`].
  UriBufferError(UriBufferError),
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for Error {}

#[cfg(feature = "_tracing-tree")]
impl From<tracing_subscriber::util::TryInitError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: tracing_subscriber::util::TryInitError) -> Self {
    Self::TryInitError(from)
  }
}

impl From<core::fmt::Error> for Error {
  #[inline]
  #[track_caller]
  fn from(from: core::fmt::Error) -> Self {
    Self::Fmt(from)
  }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
  #[inline]
  #[track_caller]
  fn from(from: std::io::Error) -> Self {
    Self::IoError(from)
  }
}

impl From<core::num::ParseIntError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: core::num::ParseIntError) -> Self {
    Self::ParseIntError(from)
  }
}

impl From<UriBufferError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: UriBufferError) -> Self {
    Self::UriBufferError(from)
  }
}

/// Errors raised while assembling an URI.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UriBufferError {
  /// Path fragments can not be written once the query section started.
  QueryAlreadyStarted,
  /// The number of buffered fragments would exceed the configured threshold.
  TooManyPendingValues {
    /// See [`crate::UriBufferParams::max_pending`].
    max_pending: usize,
  },
  /// The length of the URI would exceed the configured threshold.
  UriIsTooLarge {
    /// See [`crate::UriBufferParams::max_len`].
    max_len: usize,
  },
}
