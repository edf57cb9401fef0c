//! Encoding, decoding, and lowering of [`BinaryValue`] trees.
//!
//! Every node is written depth-first, pre-order, as
//!
//! ```text
//! node    := shape:i32 component:i32 count:i32 payload
//! payload := STRING  -> count bytes of UTF-8
//!            SCALAR  -> the scalar's encoded bytes (none for NULL)
//!            ARRAY   -> count nodes
//!            OBJECT  -> count (key:STRING node, value:node) pairs
//! ```
//!
//! with all integers big-endian. Nodes carry no framing beyond this header:
//! each one describes its own extent, so arrays and objects are plain
//! concatenations of their children.

use tracing::{debug, trace};

use crate::{
    binary::{BinaryValue, Component, ObjectMap, Scalar, Shape},
    buffer::ByteBuffer,
    error::{DecodeError, EncodeError},
    options::{DEFAULT_MAX_DEPTH, DecodeOptions},
    value::Value,
};

/// Size of a node header: shape, component, and count.
pub const HEADER_LEN: usize = 12;

/// Encodes `value` into a fresh buffer whose cursor sits at 0, ready for
/// [`decode`].
///
/// # Errors
///
/// - [`EncodeError::LengthOverflow`] if a string, payload, or collection is
///   too large for the 32-bit count field.
/// - [`EncodeError::DepthLimitExceeded`] if the value nests deeper than
///   [`DEFAULT_MAX_DEPTH`], the limit [`decode`] applies by default. Every
///   stream `encode` produces therefore decodes with default options.
///
/// # Examples
///
/// ```
/// use tagwire::{auto, decode, encode, to_native, Value};
///
/// let buf = encode(&auto(vec![1, 2])).unwrap();
/// assert_eq!(buf.cursor(), 0);
/// assert_eq!(to_native(&decode(&buf).unwrap()), Value::from(vec![1, 2]));
/// ```
pub fn encode(value: &BinaryValue) -> Result<ByteBuffer, EncodeError> {
    let mut buf = ByteBuffer::new();
    encode_into(value, &mut buf)?;
    Ok(buf)
}

/// Encodes `value` at the cursor of `buf`, then moves the cursor back to where
/// it was before the call.
///
/// Callers appending several values seek past the written bytes themselves.
/// On error the bytes written so far are left in place.
///
/// # Errors
///
/// As for [`encode`].
pub fn encode_into(value: &BinaryValue, buf: &mut ByteBuffer) -> Result<(), EncodeError> {
    let start = buf.cursor();
    let result = write_node(value, buf, 0);
    buf.set_cursor(start);
    result
}

fn count_field(len: usize) -> Result<i32, EncodeError> {
    i32::try_from(len).map_err(|_| EncodeError::LengthOverflow { len })
}

fn write_header(buf: &mut ByteBuffer, shape: Shape, component: Component, count: i32) {
    buf.write_i32(shape.tag());
    buf.write_i32(component.tag());
    buf.write_i32(count);
}

fn write_string_node(bytes: &[u8], buf: &mut ByteBuffer) -> Result<(), EncodeError> {
    let count = count_field(bytes.len())?;
    write_header(buf, Shape::String, Component::Char, count);
    buf.write(bytes);
    Ok(())
}

fn write_node(value: &BinaryValue, buf: &mut ByteBuffer, depth: usize) -> Result<(), EncodeError> {
    if depth > DEFAULT_MAX_DEPTH {
        debug!(limit = DEFAULT_MAX_DEPTH, "encode nesting limit exceeded");
        return Err(EncodeError::DepthLimitExceeded {
            limit: DEFAULT_MAX_DEPTH,
        });
    }
    match value {
        BinaryValue::String(bytes) => write_string_node(bytes.as_bytes(), buf),
        BinaryValue::Scalar(scalar) => {
            let payload = scalar.payload().as_bytes();
            write_header(buf, Shape::Scalar, scalar.component(), count_field(payload.len())?);
            buf.write(payload);
            Ok(())
        }
        BinaryValue::Array(items) => {
            write_header(buf, Shape::Array, Component::Aggregate, count_field(items.len())?);
            for item in items {
                write_node(item, buf, depth + 1)?;
            }
            Ok(())
        }
        BinaryValue::Object(entries) => {
            write_header(buf, Shape::Object, Component::Aggregate, count_field(entries.len())?);
            for (key, item) in entries {
                write_string_node(key.as_bytes(), buf)?;
                write_node(item, buf, depth + 1)?;
            }
            Ok(())
        }
    }
}

/// Decodes one node tree starting at the cursor of `buf`, using
/// [`DecodeOptions::default`].
///
/// The cursor ends just past the decoded bytes, so consecutive values in one
/// buffer decode with consecutive calls.
///
/// # Errors
///
/// Any [`DecodeError`]; the decode is all-or-nothing.
pub fn decode(buf: &ByteBuffer) -> Result<BinaryValue, DecodeError> {
    decode_with_options(buf, &DecodeOptions::default())
}

/// Decodes one node tree starting at the cursor of `buf`.
///
/// # Errors
///
/// - [`DecodeError::UnknownShape`] / [`DecodeError::UnknownComponent`] for tags
///   outside the wire enumerations.
/// - [`DecodeError::ExpectedStringKey`] when an object key is not a string node.
/// - [`DecodeError::UnexpectedEnd`] when the stream is truncated.
/// - [`DecodeError::InvalidUtf8`] for bad text when `strict_utf8` is set.
/// - [`DecodeError::DepthLimitExceeded`] past `max_depth`.
pub fn decode_with_options(
    buf: &ByteBuffer,
    options: &DecodeOptions,
) -> Result<BinaryValue, DecodeError> {
    Decoder { buf, options }.node(0)
}

struct Decoder<'a> {
    buf: &'a ByteBuffer,
    options: &'a DecodeOptions,
}

/// A non-positive count means "empty".
fn len(count: i32) -> usize {
    usize::try_from(count).unwrap_or(0)
}

impl Decoder<'_> {
    fn node(&self, depth: usize) -> Result<BinaryValue, DecodeError> {
        if let Some(limit) = self.options.max_depth.filter(|limit| depth > *limit) {
            debug!(limit, "decode nesting limit exceeded");
            return Err(DecodeError::DepthLimitExceeded { limit });
        }

        let shape_tag = self.buf.read_i32()?;
        let component_tag = self.buf.read_i32()?;
        let count = self.buf.read_i32()?;
        trace!(shape_tag, component_tag, count, depth, "node header");

        let shape = Shape::try_from(shape_tag).inspect_err(|e| debug!(%e, "bad shape tag"))?;
        let component =
            Component::try_from(component_tag).inspect_err(|e| debug!(%e, "bad component tag"))?;

        match shape {
            Shape::String => self.string(count),
            Shape::Scalar => self.scalar(component, count, depth),
            Shape::Array => self.array(count, depth),
            Shape::Object => self.object(count, depth),
        }
    }

    fn text_bytes(&self, n: usize) -> Result<Vec<u8>, DecodeError> {
        let bytes = self.buf.read_bytes(n)?;
        if self.options.strict_utf8 && core::str::from_utf8(&bytes).is_err() {
            debug!(len = n, "invalid utf-8 in string payload");
            return Err(DecodeError::InvalidUtf8);
        }
        Ok(bytes)
    }

    fn string(&self, count: i32) -> Result<BinaryValue, DecodeError> {
        if count <= 0 {
            return Ok(BinaryValue::string(""));
        }
        Ok(BinaryValue::String(ByteBuffer::from(
            self.text_bytes(len(count))?,
        )))
    }

    fn scalar(
        &self,
        component: Component,
        count: i32,
        depth: usize,
    ) -> Result<BinaryValue, DecodeError> {
        if count <= 0 {
            return Ok(BinaryValue::null());
        }
        let buf = self.buf;
        Ok(match component {
            Component::Null => BinaryValue::null(),
            Component::Byte => BinaryValue::byte(buf.read_byte()?),
            Component::Bool => BinaryValue::bool(buf.read_bool()?),
            Component::Char => BinaryValue::Scalar(Scalar::from_wire(
                Component::Char,
                buf.read_bytes(len(count))?,
            )),
            Component::Int32 => BinaryValue::int32(buf.read_i32()?),
            Component::Uint32 => BinaryValue::uint32(buf.read_u32()?),
            Component::Int64 => BinaryValue::int64(buf.read_i64()?),
            Component::Uint64 => BinaryValue::uint64(buf.read_u64()?),
            Component::Float32 => BinaryValue::float32(buf.read_f32()?),
            Component::Float64 => BinaryValue::float64(buf.read_f64()?),
            // A scalar header announcing a nested node: the node follows
            // directly and is surfaced as a one-element array.
            Component::Aggregate => BinaryValue::array([self.node(depth + 1)?]),
        })
    }

    /// Capacity hint that a hostile count cannot inflate: every node needs at
    /// least a header's worth of remaining input.
    fn capacity_for(&self, n: usize, nodes_per_item: usize) -> usize {
        n.min(self.buf.remaining() / (HEADER_LEN * nodes_per_item))
    }

    fn array(&self, count: i32, depth: usize) -> Result<BinaryValue, DecodeError> {
        let n = len(count);
        let mut items = Vec::with_capacity(self.capacity_for(n, 1));
        for _ in 0..n {
            items.push(self.node(depth + 1)?);
        }
        Ok(BinaryValue::Array(items))
    }

    fn object(&self, count: i32, depth: usize) -> Result<BinaryValue, DecodeError> {
        let n = len(count);
        let mut entries = ObjectMap::with_capacity(self.capacity_for(n, 2));
        for _ in 0..n {
            let key = self.node(depth + 1)?;
            let BinaryValue::String(key_bytes) = &key else {
                debug!(found = ?key.shape(), "object key is not a string node");
                return Err(DecodeError::ExpectedStringKey { found: key.shape() });
            };
            let name = key_bytes.with(|b| {
                b.set_cursor(0);
                b.read_str(b.len())
            })?;
            let value = self.node(depth + 1)?;
            entries.insert(name, value);
        }
        Ok(BinaryValue::Object(entries))
    }
}

/// Lowers a tagged value back into a native [`Value`].
///
/// | tagged                                   | native           |
/// |------------------------------------------|------------------|
/// | `NULL`                                   | `Null`           |
/// | `BOOL`                                   | `Boolean`        |
/// | `BYTE`, `INT32`, `UINT32`, `FLOAT32/64`  | `Number`         |
/// | `INT64`, `UINT64`                        | `BigInt`         |
/// | `CHAR`, `STRING`                         | `String`         |
/// | `ARRAY`                                  | `Array`          |
/// | `OBJECT`                                 | `Object`, order kept |
///
/// Payloads are read with scoped reads, so their cursors are unchanged
/// afterwards. Invalid UTF-8 is replaced with U+FFFD.
///
/// # Examples
///
/// ```
/// use tagwire::{BinaryValue, Value, to_native};
///
/// assert_eq!(to_native(&BinaryValue::uint64(u64::MAX)), Value::BigInt(u64::MAX.into()));
/// assert_eq!(to_native(&BinaryValue::char('☕')), Value::from("☕"));
/// ```
#[must_use]
pub fn to_native(value: &BinaryValue) -> Value {
    match value {
        BinaryValue::String(bytes) => Value::String(read_all_text(bytes)),
        // Payload widths are fixed at construction, so the typed reads cannot
        // run short.
        BinaryValue::Scalar(scalar) => lower_scalar(scalar).unwrap_or(Value::Null),
        BinaryValue::Array(items) => Value::Array(items.iter().map(to_native).collect()),
        BinaryValue::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_native(v)))
                .collect(),
        ),
    }
}

fn read_all_text(bytes: &ByteBuffer) -> String {
    bytes
        .with(|b| {
            b.set_cursor(0);
            b.read_str(b.len())
        })
        .unwrap_or_default()
}

fn lower_scalar(scalar: &Scalar) -> Result<Value, DecodeError> {
    scalar.payload().with(|b| {
        b.set_cursor(0);
        Ok(match scalar.component() {
            Component::Null | Component::Aggregate => Value::Null,
            Component::Byte => Value::from(b.read_byte()?),
            Component::Bool => Value::Boolean(b.read_bool()?),
            Component::Char => Value::String(b.read_char(b.len())?),
            Component::Int32 => Value::from(b.read_i32()?),
            Component::Uint32 => Value::from(b.read_u32()?),
            Component::Int64 => Value::from(b.read_i64()?),
            Component::Uint64 => Value::from(b.read_u64()?),
            Component::Float32 => Value::from(b.read_f32()?),
            Component::Float64 => Value::Number(b.read_f64()?),
        })
    })
}
