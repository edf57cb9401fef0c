//! Growable byte store addressed by a single cursor.
//!
//! [`ByteBuffer`] owns a contiguous byte sequence and one cursor that every
//! read and write moves forward. A single saved-cursor slot supports
//! save/restore positioning; [`ByteBuffer::with`] and [`ByteBuffer::scoped`]
//! provide a guaranteed-restore variant that also survives nesting.
//!
//! All multi-byte numbers are big-endian. Floats are IEEE-754 binary32 and
//! binary64. Text is UTF-8 and is always read back by *byte* length.
//!
//! The cursor lives in a [`Cell`], so reads only need `&self`: a holder of a
//! shared [`BinaryValue`](crate::BinaryValue) can peek into its payload
//! without taking it apart. The type is consequently `!Sync` and must not be
//! shared between concurrent encode or decode calls.

use core::{cell::Cell, fmt, ops::Deref};

use bstr::ByteSlice;

use crate::error::DecodeError;

/// Byte store with one read/write cursor and one saved-cursor slot.
///
/// # Examples
///
/// ```
/// use tagwire::ByteBuffer;
///
/// let mut buf = ByteBuffer::new();
/// buf.write_i32(7);
/// buf.write_str("hi");
/// assert_eq!(buf.as_bytes(), &[0, 0, 0, 7, b'h', b'i']);
///
/// buf.set_cursor(0);
/// assert_eq!(buf.read_i32(), Ok(7));
/// assert_eq!(buf.read_str(2).as_deref(), Ok("hi"));
/// ```
#[derive(Clone, Default)]
pub struct ByteBuffer {
    data: Vec<u8>,
    cursor: Cell<usize>,
    saved: Cell<usize>,
}

impl ByteBuffer {
    /// Creates an empty buffer with the cursor at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer that can hold `capacity` bytes before
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of stored bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when no bytes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor.get()
    }

    /// All stored bytes, independent of the cursor.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Moves the cursor to `pos`, clamped to the stored length.
    pub fn set_cursor(&self, pos: usize) {
        self.cursor.set(pos.min(self.data.len()));
    }

    /// Moves the cursor to an absolute position, or relative to the end when
    /// `pos` is negative (`-1` is the last byte).
    pub fn seek(&self, pos: isize) {
        match usize::try_from(pos) {
            Ok(pos) => self.set_cursor(pos),
            Err(_) => self
                .cursor
                .set(self.data.len().saturating_sub(pos.unsigned_abs())),
        }
    }

    /// Stores the cursor in the saved slot, overwriting any earlier save.
    pub fn save_cursor(&self) {
        self.saved.set(self.cursor.get());
    }

    /// Moves the cursor back to the saved slot.
    pub fn restore_cursor(&self) {
        self.set_cursor(self.saved.get());
    }

    /// Captures the cursor and returns a guard that restores it on drop.
    ///
    /// Unlike [`save_cursor`](Self::save_cursor), guards nest: each one keeps
    /// its own captured position.
    #[must_use]
    pub fn scoped(&self) -> ScopedCursor<'_> {
        ScopedCursor {
            buffer: self,
            restore_to: self.cursor.get(),
        }
    }

    /// Runs `f` and restores the cursor afterwards, whatever `f` did to it.
    ///
    /// The restore also happens if `f` panics.
    ///
    /// ```
    /// use tagwire::ByteBuffer;
    ///
    /// let mut buf = ByteBuffer::new();
    /// buf.write_u32(0xdead_beef);
    /// buf.set_cursor(0);
    /// assert_eq!(buf.with(|b| b.read_u32()), Ok(0xdead_beef));
    /// assert_eq!(buf.cursor(), 0);
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        let scope = self.scoped();
        f(scope.buffer)
    }

    /// Writes `bytes` at the cursor, growing the store when the write runs
    /// past the end, then advances the cursor by `bytes.len()`.
    ///
    /// Bytes already stored beyond the written range are kept.
    pub fn write(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let start = self.cursor.get();
        let end = start + bytes.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(bytes);
        self.cursor.set(end);
    }

    /// Returns up to `n` bytes at the cursor and advances past them.
    ///
    /// Short reads are clamped to what remains; callers that need an exact
    /// length use [`read_exact`](Self::read_exact).
    pub fn read(&self, n: usize) -> &[u8] {
        let start = self.cursor.get();
        let end = start.saturating_add(n).min(self.data.len());
        self.cursor.set(end);
        &self.data[start..end]
    }

    /// Returns exactly `n` bytes at the cursor and advances past them.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] if fewer than `n` bytes remain; the
    /// cursor is left where it was.
    pub fn read_exact(&self, n: usize) -> Result<&[u8], DecodeError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(DecodeError::UnexpectedEnd {
                needed: n,
                remaining,
            });
        }
        Ok(self.read(n))
    }

    fn read_array<const N: usize>(&self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Writes one byte.
    pub fn write_byte(&mut self, x: u8) {
        self.write(&[x]);
    }

    /// Writes `1` for `true` and `0` for `false`.
    pub fn write_bool(&mut self, x: bool) {
        self.write_byte(u8::from(x));
    }

    /// Writes the UTF-8 encoding of `x` (one to four bytes).
    pub fn write_char(&mut self, x: char) {
        let mut scratch = [0u8; 4];
        self.write(x.encode_utf8(&mut scratch).as_bytes());
    }

    /// Writes a big-endian `i32`.
    pub fn write_i32(&mut self, x: i32) {
        self.write(&x.to_be_bytes());
    }

    /// Writes a big-endian `i64`.
    pub fn write_i64(&mut self, x: i64) {
        self.write(&x.to_be_bytes());
    }

    /// Writes a big-endian `u32`.
    pub fn write_u32(&mut self, x: u32) {
        self.write(&x.to_be_bytes());
    }

    /// Writes a big-endian `u64`.
    pub fn write_u64(&mut self, x: u64) {
        self.write(&x.to_be_bytes());
    }

    /// Writes a big-endian IEEE-754 binary32.
    pub fn write_f32(&mut self, x: f32) {
        self.write(&x.to_be_bytes());
    }

    /// Writes a big-endian IEEE-754 binary64.
    pub fn write_f64(&mut self, x: f64) {
        self.write(&x.to_be_bytes());
    }

    /// Writes the UTF-8 bytes of `x` with no length prefix.
    pub fn write_str(&mut self, x: &str) {
        self.write(x.as_bytes());
    }

    /// Reads `n` bytes into an owned vector.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_bytes(&self, n: usize) -> Result<Vec<u8>, DecodeError> {
        self.read_exact(n).map(<[u8]>::to_vec)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_byte(&self) -> Result<u8, DecodeError> {
        self.read_array::<1>().map(|[b]| b)
    }

    /// Reads one byte; any non-zero value is `true`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_bool(&self) -> Result<bool, DecodeError> {
        self.read_byte().map(|b| b != 0)
    }

    /// Reads `byte_count` bytes of UTF-8 holding one character.
    ///
    /// The length is in bytes, not characters. Invalid sequences decode to
    /// U+FFFD.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_char(&self, byte_count: usize) -> Result<String, DecodeError> {
        self.read_str(byte_count)
    }

    /// Reads a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_i32(&self) -> Result<i32, DecodeError> {
        self.read_array().map(i32::from_be_bytes)
    }

    /// Reads a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_i64(&self) -> Result<i64, DecodeError> {
        self.read_array().map(i64::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_u32(&self) -> Result<u32, DecodeError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Reads a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_u64(&self) -> Result<u64, DecodeError> {
        self.read_array().map(u64::from_be_bytes)
    }

    /// Reads a big-endian binary32.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_f32(&self) -> Result<f32, DecodeError> {
        self.read_array().map(f32::from_be_bytes)
    }

    /// Reads a big-endian binary64.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_f64(&self) -> Result<f64, DecodeError> {
        self.read_array().map(f64::from_be_bytes)
    }

    /// Reads `byte_len` bytes of UTF-8 text. Invalid sequences decode to
    /// U+FFFD.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEnd`] on a short buffer.
    pub fn read_str(&self, byte_len: usize) -> Result<String, DecodeError> {
        self.read_exact(byte_len)
            .map(|bytes| bytes.to_str_lossy().into_owned())
    }
}

/// Guard returned by [`ByteBuffer::scoped`]; restores the cursor on drop.
pub struct ScopedCursor<'a> {
    buffer: &'a ByteBuffer,
    restore_to: usize,
}

impl Deref for ScopedCursor<'_> {
    type Target = ByteBuffer;

    fn deref(&self) -> &ByteBuffer {
        self.buffer
    }
}

impl Drop for ScopedCursor<'_> {
    fn drop(&mut self) {
        self.buffer.cursor.set(self.restore_to);
    }
}

// Buffers compare by content; where a reader happens to be is not part of the
// value.
impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for ByteBuffer {}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("data", &self.data.as_bstr())
            .field("cursor", &self.cursor.get())
            .finish()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buf: ByteBuffer) -> Self {
        buf.data
    }
}
