//! Lifting native values into the tagged model.
//!
//! [`auto`] is total: every [`Value`] maps to some [`BinaryValue`]. The mapping
//! is deliberately approximate for numbers (integral doubles become `INT32`,
//! everything else `FLOAT32`) and collapses shapes the wire cannot carry
//! (functions, non-plain objects) to null.

use crate::{binary::BinaryValue, value::Value};

/// Lifts a native value into the tagged model, recursively.
///
/// | native                    | lifted                                   |
/// |---------------------------|------------------------------------------|
/// | `Null`, `Undefined`       | `NULL` scalar                            |
/// | `Binary(b)`               | `b`, unchanged                           |
/// | `Array`                   | `ARRAY` of lifted elements               |
/// | `Number`, integral        | `INT32`, wrapped modulo 2³²              |
/// | `Number`, otherwise       | `FLOAT32`, rounded                       |
/// | `String`                  | `STRING`                                 |
/// | `Boolean`                 | `BOOL`                                   |
/// | `Symbol(d)`               | `STRING` `"Symbol(d)"`                   |
/// | `BigInt`                  | `INT64`, wrapped modulo 2⁶⁴              |
/// | `Function`                | `NULL` scalar                            |
/// | `Object`                  | `OBJECT` of lifted entries, order kept   |
/// | `Opaque`                  | `NULL` scalar                            |
///
/// # Examples
///
/// ```
/// use tagwire::{Component, Shape, Value, auto};
///
/// let five = auto(5);
/// assert_eq!((five.shape(), five.component(), five.count()), (Shape::Scalar, Component::Int32, 4));
///
/// let half = auto(0.5);
/// assert_eq!(half.component(), Component::Float32);
///
/// // Already-lifted values pass through.
/// assert_eq!(auto(auto("x")), auto("x"));
///
/// assert!(auto(Value::Function).is_null());
/// ```
pub fn auto(value: impl Into<Value>) -> BinaryValue {
    lift(value.into())
}

fn lift(value: Value) -> BinaryValue {
    match value {
        Value::Null | Value::Undefined | Value::Function | Value::Opaque(_) => BinaryValue::null(),
        Value::Binary(b) => b,
        Value::Array(items) => BinaryValue::array(items.into_iter().map(lift)),
        Value::Number(n) if is_integer(n) => BinaryValue::int32(wrap_i32(n)),
        #[allow(clippy::cast_possible_truncation)]
        Value::Number(n) => BinaryValue::float32(n as f32),
        Value::String(s) => BinaryValue::string(s),
        Value::Boolean(b) => BinaryValue::bool(b),
        Value::Symbol(description) => BinaryValue::string(format!("Symbol({description})")),
        #[allow(clippy::cast_possible_truncation)]
        Value::BigInt(n) => BinaryValue::int64(n as i64),
        Value::Object(entries) => {
            BinaryValue::object(entries.into_iter().map(|(k, v)| (k, lift(v))))
        }
    }
}

fn is_integer(n: f64) -> bool {
    n.is_finite() && n.trunc() == n
}

/// Two's-complement wrap of an integral double into 32 bits.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn wrap_i32(n: f64) -> i32 {
    const TWO_32: f64 = 4_294_967_296.0;
    (n.rem_euclid(TWO_32) as u32) as i32
}
