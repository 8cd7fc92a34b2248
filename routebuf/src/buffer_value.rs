use crate::misc::Lease;
use alloc::string::String;

/// [BufferValue] with a string reference.
pub type BufferValueRef<'value> = BufferValue<&'value str>;
/// [BufferValue] with an owned string.
pub type BufferValueString = BufferValue<String>;

/// Textual fragment that is going to be appended to an URI.
///
/// `requires_encoding` tells the consumer whether `value` must be percent-encoded before being
/// written. This structure never encodes anything by itself.
///
/// ```rust
/// let value = routebuf::BufferValue::new("100% done", true);
/// assert_eq!(value.value(), "100% done");
/// assert!(value.requires_encoding());
/// ```
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BufferValue<S> {
  value: S,
  requires_encoding: bool,
}

impl<S> BufferValue<S> {
  /// Stores both parameters as they are.
  #[inline]
  pub const fn new(value: S, requires_encoding: bool) -> Self {
    Self { value, requires_encoding }
  }

  /// Unwraps the inner text storage.
  #[inline]
  pub fn into_value(self) -> S {
    self.value
  }

  /// If `true`, [`Self::value`] must be percent-encoded before concatenation.
  #[inline]
  pub const fn requires_encoding(&self) -> bool {
    self.requires_encoding
  }
}

impl<S> BufferValue<S>
where
  S: Lease<str>,
{
  /// See [`BufferValueRef`].
  #[inline]
  pub fn to_ref(&self) -> BufferValueRef<'_> {
    BufferValueRef { value: self.value.lease(), requires_encoding: self.requires_encoding }
  }

  /// See [`BufferValueString`].
  #[inline]
  pub fn to_string(&self) -> BufferValueString {
    BufferValueString { value: self.value.lease().into(), requires_encoding: self.requires_encoding }
  }

  /// Text content
  #[inline]
  pub fn value(&self) -> &str {
    self.value.lease()
  }
}

impl<'value> From<&'value str> for BufferValueRef<'value> {
  /// Literals don't need encoding.
  #[inline]
  fn from(from: &'value str) -> Self {
    Self::new(from, false)
  }
}

#[cfg(test)]
mod tests {
  use crate::{BufferValue, BufferValueRef, BufferValueString};

  fn assert_send_sync<T>(_: &T)
  where
    T: Send + Sync,
  {
  }

  #[test]
  fn empty_value_requiring_encoding() {
    let value = BufferValue::new("", true);
    assert_eq!(value.value(), "");
    assert!(value.requires_encoding());
  }

  #[test]
  fn equal_pairs_are_equivalent() {
    let lhs = BufferValue::new("abc", false);
    let rhs = BufferValueString::new("abc".into(), false);
    assert_eq!(lhs, rhs.to_ref());
    assert_eq!(lhs.to_string(), rhs);
    assert_ne!(lhs, BufferValue::new("abc", true));
  }

  #[test]
  fn literal_conversion_does_not_require_encoding() {
    let value = BufferValueRef::from("/");
    assert_eq!(value.value(), "/");
    assert!(!value.requires_encoding());
  }

  #[test]
  fn is_shareable_between_threads() {
    assert_send_sync(&BufferValueString::new("abc".into(), false));
  }

  #[test]
  fn stores_parameters_verbatim() {
    let value = BufferValue::new("100% done", true);
    assert_eq!(value.value(), "100% done");
    assert!(value.requires_encoding());
    let copy = value;
    assert_eq!(copy.into_value(), value.value());
    let value = BufferValue::new("abc", false);
    assert_eq!(value.value(), "abc");
    assert!(!value.requires_encoding());
  }

  #[cfg(feature = "serde")]
  #[test]
  fn serde_keeps_both_fields() {
    let value = BufferValueString::new("a b".into(), true);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"value":"a b","requires_encoding":true}"#);
    assert_eq!(serde_json::from_str::<BufferValueString>(&json).unwrap(), value);
  }
}

#[cfg(feature = "_proptest")]
#[cfg(test)]
mod _proptest {
  use crate::BufferValue;
  use alloc::string::String;

  #[test_strategy::proptest]
  fn accessors_return_construction_parameters(value: String, requires_encoding: bool) {
    let instance = BufferValue::new(value.clone(), requires_encoding);
    assert_eq!(instance.value(), value.as_str());
    assert_eq!(instance.requires_encoding(), requires_encoding);
    assert_eq!(instance.to_ref(), BufferValue::new(value.as_str(), requires_encoding));
  }
}
