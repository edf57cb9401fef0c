//! The tagged in-memory model that mirrors the wire format.
//!
//! A [`BinaryValue`] is one of four shapes. Scalars additionally carry a
//! [`Component`] naming their concrete type; strings always use
//! [`Component::Char`] and the two collection shapes use
//! [`Component::Aggregate`]. Scalar and string payloads are encoded eagerly at
//! construction, so a built value is exactly what `encode` will write.

use core::fmt;

use indexmap::IndexMap;

use crate::{buffer::ByteBuffer, error::DecodeError};

/// Ordered mapping used by object values. Insertion order is wire order.
pub type ObjectMap = IndexMap<String, BinaryValue>;

/// Top-level wire discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Shape {
    /// One scalar, null included.
    Scalar = 0,
    /// A counted sequence of nested nodes.
    Array = 1,
    /// A counted sequence of key/value node pairs.
    Object = 2,
    /// UTF-8 text.
    String = 3,
}

impl Shape {
    /// The wire tag for this shape.
    #[must_use]
    pub const fn tag(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Shape {
    type Error = DecodeError;

    fn try_from(tag: i32) -> Result<Self, DecodeError> {
        Ok(match tag {
            0 => Self::Scalar,
            1 => Self::Array,
            2 => Self::Object,
            3 => Self::String,
            _ => return Err(DecodeError::UnknownShape(tag)),
        })
    }
}

/// Secondary wire discriminator identifying a scalar's concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Component {
    /// No value; empty payload.
    Null = 0,
    /// Unsigned 8-bit integer.
    Byte = 1,
    /// One byte, zero or one.
    Bool = 2,
    /// One UTF-8 encoded character.
    Char = 3,
    /// Signed 32-bit integer.
    Int32 = 4,
    /// Signed 64-bit integer.
    Int64 = 5,
    /// Unsigned 32-bit integer.
    Uint32 = 6,
    /// Unsigned 64-bit integer.
    Uint64 = 7,
    /// IEEE-754 binary32.
    Float32 = 8,
    /// IEEE-754 binary64.
    Float64 = 9,
    /// Used by arrays and objects, and as the nested-value escape inside a
    /// scalar header.
    Aggregate = 10,
}

impl Component {
    /// The wire tag for this component.
    #[must_use]
    pub const fn tag(self) -> i32 {
        self as i32
    }

    /// Encoded payload width of a scalar of this component.
    ///
    /// `None` for [`Char`](Self::Char), whose width depends on the code point,
    /// and for [`Aggregate`](Self::Aggregate), which has no scalar payload.
    #[must_use]
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Null => Some(0),
            Self::Byte | Self::Bool => Some(1),
            Self::Int32 | Self::Uint32 | Self::Float32 => Some(4),
            Self::Int64 | Self::Uint64 | Self::Float64 => Some(8),
            Self::Char | Self::Aggregate => None,
        }
    }
}

impl TryFrom<i32> for Component {
    type Error = DecodeError;

    fn try_from(tag: i32) -> Result<Self, DecodeError> {
        Ok(match tag {
            0 => Self::Null,
            1 => Self::Byte,
            2 => Self::Bool,
            3 => Self::Char,
            4 => Self::Int32,
            5 => Self::Int64,
            6 => Self::Uint32,
            7 => Self::Uint64,
            8 => Self::Float32,
            9 => Self::Float64,
            10 => Self::Aggregate,
            _ => return Err(DecodeError::UnknownComponent(tag)),
        })
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Byte => "BYTE",
            Self::Bool => "BOOL",
            Self::Char => "CHAR",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Uint32 => "UINT32",
            Self::Uint64 => "UINT64",
            Self::Float32 => "FLOAT32",
            Self::Float64 => "FLOAT64",
            Self::Aggregate => "AGGREGATE",
        };
        f.write_str(name)
    }
}

/// A single encoded scalar.
///
/// The payload holds exactly [`Component::width`] bytes, or the UTF-8 bytes of
/// one character for [`Component::Char`]. Its cursor sits at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    component: Component,
    payload: ByteBuffer,
}

impl Scalar {
    fn encoded(component: Component, write: impl FnOnce(&mut ByteBuffer)) -> Self {
        let mut payload = ByteBuffer::with_capacity(component.width().unwrap_or(4));
        write(&mut payload);
        payload.set_cursor(0);
        Self { component, payload }
    }

    /// Wraps bytes read off the wire. The caller guarantees they match the
    /// component's width.
    pub(crate) fn from_wire(component: Component, bytes: Vec<u8>) -> Self {
        Self {
            component,
            payload: ByteBuffer::from(bytes),
        }
    }

    /// Concrete scalar type.
    #[must_use]
    pub fn component(&self) -> Component {
        self.component
    }

    /// Encoded bytes of the scalar.
    #[must_use]
    pub fn payload(&self) -> &ByteBuffer {
        &self.payload
    }
}

/// Tagged value mirroring one node of the wire format.
///
/// Values are built through the constructor functions ([`BinaryValue::int32`],
/// [`BinaryValue::string`], ...) or lifted from a native
/// [`Value`](crate::Value) with [`auto`](crate::auto), and are not mutated
/// afterwards.
///
/// Equality is structural and order-sensitive for objects, since two objects
/// with the same entries in a different order encode to different bytes.
///
/// # Examples
///
/// ```
/// use tagwire::{BinaryValue, Component, Shape};
///
/// let v = BinaryValue::array([BinaryValue::int32(1), BinaryValue::string("hé")]);
/// assert_eq!(v.shape(), Shape::Array);
/// assert_eq!(v.component(), Component::Aggregate);
/// assert_eq!(v.count(), 2);
///
/// let s = BinaryValue::string("hé");
/// assert_eq!(s.count(), 3);
/// ```
#[derive(Debug, Clone)]
pub enum BinaryValue {
    /// A fixed- or char-width scalar, including null.
    Scalar(Scalar),
    /// UTF-8 text. The buffer's cursor sits at 0.
    String(ByteBuffer),
    /// Ordered elements.
    Array(Vec<BinaryValue>),
    /// Ordered entries with unique string keys.
    Object(ObjectMap),
}

impl BinaryValue {
    /// The null scalar: no payload, count 0.
    #[must_use]
    pub fn null() -> Self {
        Self::Scalar(Scalar {
            component: Component::Null,
            payload: ByteBuffer::new(),
        })
    }

    /// A `BYTE` scalar.
    #[must_use]
    pub fn byte(value: u8) -> Self {
        Self::Scalar(Scalar::encoded(Component::Byte, |b| b.write_byte(value)))
    }

    /// A `BOOL` scalar.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::Scalar(Scalar::encoded(Component::Bool, |b| b.write_bool(value)))
    }

    /// A single character, stored as its one to four UTF-8 bytes.
    #[must_use]
    pub fn char(value: char) -> Self {
        Self::Scalar(Scalar::encoded(Component::Char, |b| b.write_char(value)))
    }

    /// An `INT32` scalar.
    #[must_use]
    pub fn int32(value: i32) -> Self {
        Self::Scalar(Scalar::encoded(Component::Int32, |b| b.write_i32(value)))
    }

    /// An `INT64` scalar.
    #[must_use]
    pub fn int64(value: i64) -> Self {
        Self::Scalar(Scalar::encoded(Component::Int64, |b| b.write_i64(value)))
    }

    /// A `UINT32` scalar.
    #[must_use]
    pub fn uint32(value: u32) -> Self {
        Self::Scalar(Scalar::encoded(Component::Uint32, |b| b.write_u32(value)))
    }

    /// A `UINT64` scalar.
    #[must_use]
    pub fn uint64(value: u64) -> Self {
        Self::Scalar(Scalar::encoded(Component::Uint64, |b| b.write_u64(value)))
    }

    /// A `FLOAT32` scalar.
    #[must_use]
    pub fn float32(value: f32) -> Self {
        Self::Scalar(Scalar::encoded(Component::Float32, |b| b.write_f32(value)))
    }

    /// A `FLOAT64` scalar.
    #[must_use]
    pub fn float64(value: f64) -> Self {
        Self::Scalar(Scalar::encoded(Component::Float64, |b| b.write_f64(value)))
    }

    /// A string; `count` is its UTF-8 byte length.
    #[must_use]
    pub fn string(value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        let mut payload = ByteBuffer::with_capacity(value.len());
        payload.write_str(value);
        payload.set_cursor(0);
        Self::String(payload)
    }

    /// An array of `values`, in order.
    pub fn array(values: impl IntoIterator<Item = BinaryValue>) -> Self {
        Self::Array(values.into_iter().collect())
    }

    /// An object built from a mapping or any sequence of key/value pairs.
    ///
    /// Entries keep their first-insertion position; a repeated key replaces the
    /// earlier value in place.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use tagwire::BinaryValue;
    ///
    /// let from_pairs = BinaryValue::object([("b", BinaryValue::null()), ("a", BinaryValue::null())]);
    /// let keys: Vec<_> = from_pairs.as_object().unwrap().keys().cloned().collect();
    /// assert_eq!(keys, ["b", "a"]);
    ///
    /// let record: BTreeMap<String, BinaryValue> = BTreeMap::new();
    /// assert_eq!(BinaryValue::object(record).count(), 0);
    /// ```
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, BinaryValue)>) -> Self {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The wire shape of this value.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Scalar(_) => Shape::Scalar,
            Self::String(_) => Shape::String,
            Self::Array(_) => Shape::Array,
            Self::Object(_) => Shape::Object,
        }
    }

    /// The wire component tag of this value.
    #[must_use]
    pub fn component(&self) -> Component {
        match self {
            Self::Scalar(s) => s.component,
            Self::String(_) => Component::Char,
            Self::Array(_) | Self::Object(_) => Component::Aggregate,
        }
    }

    /// Payload byte length for scalars and strings, element or entry count for
    /// arrays and objects.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Scalar(s) => s.payload.len(),
            Self::String(b) => b.len(),
            Self::Array(items) => items.len(),
            Self::Object(entries) => entries.len(),
        }
    }

    /// Returns `true` for the null scalar.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(s) if s.component == Component::Null)
    }

    /// The scalar, if this is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[BinaryValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The entries, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Scalar or string payload bytes; `None` for collections.
    #[must_use]
    pub fn payload(&self) -> Option<&ByteBuffer> {
        match self {
            Self::Scalar(s) => Some(&s.payload),
            Self::String(b) => Some(b),
            Self::Array(_) | Self::Object(_) => None,
        }
    }
}

impl PartialEq for BinaryValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.len() == b.len() && a.iter().eq(b.iter()),
            _ => false,
        }
    }
}

impl Eq for BinaryValue {}

impl Default for BinaryValue {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_payloads_have_fixed_width() {
        let cases = [
            (BinaryValue::byte(7), Component::Byte),
            (BinaryValue::bool(true), Component::Bool),
            (BinaryValue::int32(-1), Component::Int32),
            (BinaryValue::uint32(1), Component::Uint32),
            (BinaryValue::float32(0.5), Component::Float32),
            (BinaryValue::int64(-1), Component::Int64),
            (BinaryValue::uint64(1), Component::Uint64),
            (BinaryValue::float64(0.5), Component::Float64),
        ];
        for (value, component) in cases {
            assert_eq!(value.shape(), Shape::Scalar);
            assert_eq!(value.component(), component);
            assert_eq!(Some(value.count()), component.width(), "{component}");
            assert_eq!(value.payload().map(ByteBuffer::cursor), Some(0));
        }
    }

    #[test]
    fn char_width_follows_utf8() {
        assert_eq!(BinaryValue::char('a').count(), 1);
        assert_eq!(BinaryValue::char('é').count(), 2);
        assert_eq!(BinaryValue::char('☕').count(), 3);
        assert_eq!(BinaryValue::char('🎉').count(), 4);
    }

    #[test]
    fn null_is_empty() {
        let null = BinaryValue::null();
        assert!(null.is_null());
        assert_eq!(null.count(), 0);
        assert_eq!(null.component(), Component::Null);
        assert!(null.payload().is_some_and(ByteBuffer::is_empty));
    }

    #[test]
    fn strings_count_bytes() {
        let empty = BinaryValue::string("");
        assert_eq!(empty.shape(), Shape::String);
        assert_eq!(empty.component(), Component::Char);
        assert_eq!(empty.count(), 0);
        assert_eq!(BinaryValue::string("café ☕").count(), 9);
    }

    #[test]
    fn objects_keep_first_position_of_repeated_keys() {
        let obj = BinaryValue::object([
            ("x", BinaryValue::int32(1)),
            ("y", BinaryValue::int32(2)),
            ("x", BinaryValue::int32(3)),
        ]);
        let entries: Vec<_> = obj.as_object().unwrap().iter().collect();
        assert_eq!(obj.count(), 2);
        assert_eq!(entries[0], (&"x".to_string(), &BinaryValue::int32(3)));
        assert_eq!(entries[1], (&"y".to_string(), &BinaryValue::int32(2)));
    }

    #[test]
    fn object_equality_is_order_sensitive() {
        let ab = BinaryValue::object([("a", BinaryValue::null()), ("b", BinaryValue::null())]);
        let ba = BinaryValue::object([("b", BinaryValue::null()), ("a", BinaryValue::null())]);
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn tags_round_trip_through_i32() {
        for shape in [Shape::Scalar, Shape::Array, Shape::Object, Shape::String] {
            assert_eq!(Shape::try_from(shape.tag()), Ok(shape));
        }
        for tag in 0..=10 {
            assert_eq!(Component::try_from(tag).map(Component::tag), Ok(tag));
        }
        assert_eq!(Shape::try_from(4), Err(DecodeError::UnknownShape(4)));
        assert_eq!(
            Component::try_from(-1),
            Err(DecodeError::UnknownComponent(-1))
        );
    }
}
