use alloc::{borrow::Cow, boxed::Box, string::String};

/// Copy of [core::borrow::Borrow] used to workaround orphan rules.
pub trait Lease<T>
where
  T: ?Sized,
{
  /// Immutable borrow.
  fn lease(&self) -> &T;
}

impl<T, U> Lease<U> for &T
where
  T: Lease<U> + ?Sized,
  U: ?Sized,
{
  #[inline]
  fn lease(&self) -> &U {
    <T as Lease<U>>::lease(*self)
  }
}

impl<T, U> Lease<U> for &mut T
where
  T: Lease<U> + ?Sized,
  U: ?Sized,
{
  #[inline]
  fn lease(&self) -> &U {
    <T as Lease<U>>::lease(*self)
  }
}

impl Lease<str> for str {
  #[inline]
  fn lease(&self) -> &str {
    self
  }
}

impl Lease<str> for Box<str> {
  #[inline]
  fn lease(&self) -> &str {
    self
  }
}

impl Lease<str> for Cow<'_, str> {
  #[inline]
  fn lease(&self) -> &str {
    self
  }
}

impl Lease<str> for String {
  #[inline]
  fn lease(&self) -> &str {
    self
  }
}
