/// Default nesting limit applied by [`DecodeOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration options for decoding a byte stream.
///
/// These options bound how much trust the decoder places in its input. The
/// defaults accept everything [`encode`](crate::encode) produces for any
/// reasonably nested value.
///
/// # Examples
///
/// ```rust
/// use tagwire::{DecodeOptions, auto, decode_with_options, encode};
///
/// let options = DecodeOptions {
///     max_depth: Some(8),
///     strict_utf8: true,
/// };
/// let buf = encode(&auto(vec![vec![1, 2], vec![3]])).unwrap();
/// let value = decode_with_options(&buf, &options).unwrap();
/// assert_eq!(value.count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting depth of arrays, objects, and nested scalar escapes.
    ///
    /// The top-level node is depth 0. Decoding is recursive, so an unbounded
    /// depth lets hostile input exhaust the stack. `None` disables the check
    /// for streams known to be self-produced.
    ///
    /// # Default
    ///
    /// `Some(DEFAULT_MAX_DEPTH)`
    pub max_depth: Option<usize>,

    /// Whether string payloads and object keys must be valid UTF-8.
    ///
    /// When `false`, invalid sequences are kept as raw bytes in decoded
    /// strings and replaced with U+FFFD when lowered or used as keys. Distinct
    /// invalid keys can then collapse to the same text, and the later entry
    /// replaces the earlier one, so the object holds fewer entries than its
    /// header announced. Set this when key fidelity matters.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_utf8: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            strict_utf8: false,
        }
    }
}
