#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagwire::{EncodeError, Map, Value, auto, decode, encode, to_native};

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(24)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Undefined,
            2 => Value::Boolean(u.arbitrary()?),
            3..=4 => Value::Number(u.arbitrary()?),
            5 => Value::Number(f64::from(u.arbitrary::<i32>()?)),
            6 => Value::BigInt(u.arbitrary()?),
            7..=11 => Value::String(u.arbitrary()?),
            12 => Value::Symbol(u.arbitrary()?),
            13 => Value::Function,
            14 => Value::Opaque(u.arbitrary()?),
            15..=18 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            19..=23 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn round_trip(input: ArbitraryValue) {
    let lifted = auto(input.0);
    let buf = match encode(&lifted) {
        Ok(buf) => buf,
        Err(EncodeError::DepthLimitExceeded { .. }) => return,
        Err(e) => panic!("lifted value failed to encode: {e}"),
    };
    let decoded = decode(&buf).expect("encoded value decodes");
    assert_eq!(buf.remaining(), 0);

    // Scalar equality compares payload bytes, so NaN payloads compare equal
    // here even though the lowered numbers would not.
    assert_eq!(decoded, lifted);
    assert_eq!(to_native(&decoded).to_string(), to_native(&lifted).to_string());
}

fuzz_target!(|input: ArbitraryValue| round_trip(input));
