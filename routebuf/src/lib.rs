#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

mod buffer_value;
pub mod de;
mod error;
pub mod misc;
mod query_writer;
mod uri_buffer;
mod uri_buffer_params;

pub use buffer_value::{BufferValue, BufferValueRef, BufferValueString};
pub use error::{Error, UriBufferError};
pub use query_writer::QueryWriter;
pub use uri_buffer::UriBuffer;
pub use uri_buffer_params::UriBufferParams;

/// Shortcut of [`core::result::Result<T, Error>`].
pub type Result<T> = core::result::Result<T, Error>;
