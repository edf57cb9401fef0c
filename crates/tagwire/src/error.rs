use thiserror::Error;

use crate::binary::Shape;

/// Failure raised while decoding a byte stream into a [`BinaryValue`].
///
/// Every variant aborts the decode call that produced it; no partial value is
/// returned.
///
/// [`BinaryValue`]: crate::BinaryValue
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The shape tag is not one of the four wire shapes.
    #[error("unknown shape tag {0}")]
    UnknownShape(i32),
    /// The component tag is not one of the eleven wire components.
    #[error("unknown component tag {0}")]
    UnknownComponent(i32),
    /// An object key node was not a string node.
    #[error("expected string key in object, found {found:?} node")]
    ExpectedStringKey {
        /// Shape of the offending key node.
        found: Shape,
    },
    /// The stream ended before a fixed-width field or payload was complete.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd {
        /// Bytes required by the read.
        needed: usize,
        /// Bytes left after the cursor.
        remaining: usize,
    },
    /// A string payload or key was not valid UTF-8 and strict decoding was
    /// requested.
    #[error("invalid utf-8 in string payload")]
    InvalidUtf8,
    /// Nesting went deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

/// Failure raised while encoding a [`BinaryValue`] into bytes.
///
/// [`BinaryValue`]: crate::BinaryValue
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A count or payload length does not fit the signed 32-bit count field.
    #[error("length {len} does not fit the 32-bit count field")]
    LengthOverflow {
        /// The offending length.
        len: usize,
    },
    /// Nesting went deeper than [`DEFAULT_MAX_DEPTH`], so the stream would
    /// not decode under default options.
    ///
    /// [`DEFAULT_MAX_DEPTH`]: crate::DEFAULT_MAX_DEPTH
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded {
        /// The enforced limit.
        limit: usize,
    },
}
