//! Encoding
//!
//! Transformations applied to textual fragments before they land into an URI.

mod url_encoding;

pub use url_encoding::{AsciiSet, PercentEncode};
