//! A self-describing tagged binary codec for dynamic values.
//!
//! Values travel through three stages:
//!
//! 1. [`auto`] lifts a native [`Value`] into the tagged [`BinaryValue`] model.
//! 2. [`encode`] writes a [`BinaryValue`] tree into a [`ByteBuffer`];
//!    [`decode`] reads it back.
//! 3. [`to_native`] lowers a [`BinaryValue`] into a native [`Value`].
//!
//! ```rust
//! use tagwire::{Value, auto, decode, encode, to_native};
//!
//! let input: Value = [("id", Value::from(42)), ("tags", Value::from(vec!["a", "b"]))]
//!     .into_iter()
//!     .collect();
//! let buf = encode(&auto(input.clone())).unwrap();
//! let output = to_native(&decode(&buf).unwrap());
//! assert_eq!(output, input);
//! ```
//!
//! The format is not versioned, carries no checksum, and is meant for streams
//! this codec produced itself. [`DecodeOptions`] bounds nesting depth and can
//! demand valid UTF-8 for input of lesser provenance.

mod binary;
mod buffer;
mod codec;
mod error;
mod lift;
mod options;
mod value;

#[cfg(test)]
mod tests;

pub use binary::{BinaryValue, Component, ObjectMap, Scalar, Shape};
pub use buffer::{ByteBuffer, ScopedCursor};
pub use codec::{HEADER_LEN, decode, decode_with_options, encode, encode_into, to_native};
pub use error::{DecodeError, EncodeError};
pub use lift::auto;
pub use options::{DEFAULT_MAX_DEPTH, DecodeOptions};
pub use value::{Array, Map, Value};
