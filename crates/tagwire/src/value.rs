//! Native dynamic value types and utilities.
//!
//! This module defines the [`Value`] enum, the dynamic value that
//! [`auto`](crate::auto) lifts into the tagged model and
//! [`to_native`](crate::to_native) lowers back out of it, plus helpers for
//! rendering it as JSON-like text.
//!
//! The rendering is valid JSON for the JSON kinds: non-finite numbers print as
//! `null`, and magnitudes from `1e21` up or below `1e-6` use exponent
//! notation. `BigInt` (`42n`) and the non-data variants have no JSON form.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::binary::BinaryValue;

/// Insertion-ordered mapping of a native object.
pub type Map = IndexMap<String, Value>;
/// Elements of a native array.
pub type Array = Vec<Value>;

/// A native dynamic value.
///
/// `Value` covers the JSON data types plus the dynamic shapes a lifting
/// routine has to recognise even though the wire format cannot carry them:
///
/// - Null and Undefined
/// - Boolean
/// - Number (a double) and `BigInt` (an extended-precision integer)
/// - String and Symbol
/// - Array
/// - Object (insertion ordered)
/// - Function and Opaque (non-plain objects such as dates)
/// - Binary (an already lifted value)
///
/// Object equality ignores entry order, like a deep-equal on dynamic objects;
/// compare [`Map::keys`] when order matters.
///
/// # Examples
///
/// ```
/// use tagwire::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// map.insert("n".to_string(), Value::Number(1.5));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value","n":1.5}"#);
/// ```
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Value {
    Null,
    /// An absent value; lifts like [`Null`](Value::Null).
    #[cfg_attr(any(test, feature = "serde"), serde(skip))]
    Undefined,
    Boolean(bool),
    Number(f64),
    /// An extended-precision integer.
    BigInt(i128),
    String(String),
    /// A symbol with its description.
    #[cfg_attr(any(test, feature = "serde"), serde(skip))]
    Symbol(String),
    Array(Array),
    Object(Map),
    /// A callable; never serialisable.
    #[cfg_attr(any(test, feature = "serde"), serde(skip))]
    Function,
    /// A non-plain object; the string names its runtime type.
    #[cfg_attr(any(test, feature = "serde"), serde(skip))]
    Opaque(String),
    /// A value that has already been lifted.
    #[cfg_attr(any(test, feature = "serde"), serde(skip))]
    Binary(BinaryValue),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::BigInt(i128::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::BigInt(i128::from(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::String(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Self::Object(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<BinaryValue> for Value {
    fn from(v: BinaryValue) -> Self {
        Self::Binary(v)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`] or [`Undefined`].
    ///
    /// [`Null`]: Value::Null
    /// [`Undefined`]: Value::Undefined
    ///
    /// # Examples
    ///
    /// ```
    /// use tagwire::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(Value::Undefined.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    ///
    /// # Examples
    ///
    /// ```
    /// use tagwire::Value;
    ///
    /// assert!(Value::from(false).is_bool());
    /// assert!(!Value::Number(0.0).is_bool());
    /// ```
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is a [`Number`] or a [`BigInt`].
    ///
    /// [`Number`]: Value::Number
    /// [`BigInt`]: Value::BigInt
    ///
    /// # Examples
    ///
    /// ```
    /// use tagwire::Value;
    ///
    /// assert!(Value::Number(42.0).is_number());
    /// assert!(Value::BigInt(42).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..) | Self::BigInt(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    ///
    /// # Examples
    ///
    /// ```
    /// use tagwire::Value;
    ///
    /// assert!(Value::from("s").is_string());
    /// assert!(!Value::Symbol("s".into()).is_string());
    /// ```
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    ///
    /// # Examples
    ///
    /// ```
    /// use tagwire::Value;
    ///
    /// assert!(Value::from(vec![1, 2]).is_array());
    /// assert!(!Value::from("[1,2]").is_array());
    /// ```
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is a plain [`Object`].
    ///
    /// [`Object`]: Value::Object
    ///
    /// # Examples
    ///
    /// ```
    /// use tagwire::{Map, Value};
    ///
    /// assert!(Value::Object(Map::new()).is_object());
    /// assert!(!Value::Opaque("Date".into()).is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

/// JSON string-literal escaping for `Display`: quotes, backslashes, control
/// characters, and the two Unicode line separators.
struct Escaped<'a>(&'a str);

impl core::fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        for c in self.0.chars() {
            match c {
                '"' | '\\' => {
                    f.write_char('\\')?;
                    f.write_char(c)?;
                }
                c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                    write!(f, "\\u{:04X}", u32::from(c))?;
                }
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) if !n.is_finite() => f.write_str("null"),
            Value::Number(n) if *n != 0.0 && !(1e-6..1e21).contains(&n.abs()) => {
                write!(f, "{n:e}")
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}n"),
            Value::String(s) => write!(f, "\"{}\"", Escaped(s)),
            Value::Symbol(s) => write!(f, "Symbol({s})"),
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "\"{}\":{}", Escaped(k), v)?;
                }
                f.write_str("}")
            }
            Value::Function => f.write_str("[function]"),
            Value::Opaque(kind) => write!(f, "[object {kind}]"),
            Value::Binary(b) => write!(f, "<{:?} {} x{}>", b.shape(), b.component(), b.count()),
        }
    }
}
