#![expect(missing_docs)]

use core::fmt::Write;

use insta::assert_snapshot;
use tagwire::{BinaryValue, ByteBuffer, Component, Shape, Value, auto, encode};

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Walks the raw node stream and prints one line per node header, indented by
/// depth, with scalar and string payloads in hex.
fn render_nodes(buf: &ByteBuffer, depth: usize, out: &mut String) {
    let shape = Shape::try_from(buf.read_i32().unwrap()).unwrap();
    let component = Component::try_from(buf.read_i32().unwrap()).unwrap();
    let count = buf.read_i32().unwrap();
    write!(out, "{:indent$}{shape:?} {component} {count}", "", indent = depth * 2).unwrap();
    match shape {
        Shape::Scalar | Shape::String => {
            let payload = buf.read_bytes(usize::try_from(count).unwrap_or(0)).unwrap();
            if !payload.is_empty() {
                write!(out, " | {}", hex(&payload)).unwrap();
            }
            out.push('\n');
        }
        Shape::Array => {
            out.push('\n');
            for _ in 0..count {
                render_nodes(buf, depth + 1, out);
            }
        }
        Shape::Object => {
            out.push('\n');
            for _ in 0..count * 2 {
                render_nodes(buf, depth + 1, out);
            }
        }
    }
}

fn render(value: &BinaryValue) -> String {
    let buf = encode(value).unwrap();
    let mut out = String::new();
    render_nodes(&buf, 0, &mut out);
    assert_eq!(buf.remaining(), 0, "trailing bytes after the root node");
    out
}

#[test]
fn snapshot_raw_scalar_bytes() {
    assert_snapshot!(hex(encode(&auto(5)).unwrap().as_bytes()), @"00 00 00 00 00 00 00 04 00 00 00 04 00 00 00 05");
    assert_snapshot!(hex(encode(&auto(true)).unwrap().as_bytes()), @"00 00 00 00 00 00 00 02 00 00 00 01 01");
    assert_snapshot!(hex(encode(&auto(Value::Null)).unwrap().as_bytes()), @"00 00 00 00 00 00 00 00 00 00 00 00");
    assert_snapshot!(hex(encode(&auto("hi")).unwrap().as_bytes()), @"00 00 00 03 00 00 00 03 00 00 00 02 68 69");
}

#[test]
fn snapshot_lifted_scalars() {
    let mut out = String::new();
    for value in [
        Value::from(i32::MIN),
        Value::from(1.5),
        Value::from(0.1),
        Value::from(1_i64),
        Value::from("café"),
        Value::from(""),
        Value::Symbol("id".into()),
        Value::Undefined,
    ] {
        out.push_str(&render(&auto(value)));
    }
    assert_snapshot!(out, @r"
    Scalar INT32 4 | 80 00 00 00
    Scalar FLOAT32 4 | 3f c0 00 00
    Scalar FLOAT32 4 | 3d cc cc cd
    Scalar INT64 8 | 00 00 00 00 00 00 00 01
    String CHAR 5 | 63 61 66 c3 a9
    String CHAR 0
    String CHAR 10 | 53 79 6d 62 6f 6c 28 69 64 29
    Scalar NULL 0
    ");
}

#[test]
fn snapshot_constructed_scalars() {
    let mut out = String::new();
    for value in [
        BinaryValue::byte(0xab),
        BinaryValue::bool(false),
        BinaryValue::char('é'),
        BinaryValue::uint32(u32::MAX),
        BinaryValue::uint64(256),
        BinaryValue::float64(-2.0),
    ] {
        out.push_str(&render(&value));
    }
    assert_snapshot!(out, @r"
    Scalar BYTE 1 | ab
    Scalar BOOL 1 | 00
    Scalar CHAR 2 | c3 a9
    Scalar UINT32 4 | ff ff ff ff
    Scalar UINT64 8 | 00 00 00 00 00 00 01 00
    Scalar FLOAT64 8 | c0 00 00 00 00 00 00 00
    ");
}

#[test]
fn snapshot_nested_collections() {
    let input: Value = [
        ("a", Value::from(vec![Value::from(-1)])),
        ("b", Value::from(vec![Value::Null, Value::from(true)])),
        ("c", Value::Object(tagwire::Map::new())),
    ]
    .into_iter()
    .collect();

    assert_snapshot!(render(&auto(input)), @r"
    Object AGGREGATE 3
      String CHAR 1 | 61
      Array AGGREGATE 1
        Scalar INT32 4 | ff ff ff ff
      String CHAR 1 | 62
      Array AGGREGATE 2
        Scalar NULL 0
        Scalar BOOL 1 | 01
      String CHAR 1 | 63
      Object AGGREGATE 0
    ");
}
