mod cases;

use crate::{Value, auto, decode, encode, to_native};

/// Full pipeline: lift, encode, decode, lower.
pub(crate) fn round_trip(value: &Value) -> Value {
    let buf = encode(&auto(value.clone())).expect("encode");
    let decoded = decode(&buf).expect("decode");
    assert_eq!(buf.remaining(), 0, "decode left trailing bytes");
    to_native(&decoded)
}
