//! Lifts a small record, prints its wire bytes one node per line, and reads
//! it back.
//!
//! Several encoded values can share one buffer: each call to
//! [`tagwire::encode_into`] leaves the cursor where it started, so the caller
//! seeks past the new bytes before appending the next value, and consecutive
//! [`tagwire::decode`] calls then read the values back in order.
//!
//! Run with
//!
//! ```bash
//! cargo run -p tagwire --example inspect
//! ```

use tagwire::{BinaryValue, ByteBuffer, HEADER_LEN, Value, auto, decode, encode_into, to_native};

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints `value` the way it lies on the wire: header fields, then payload.
fn print_node(value: &BinaryValue, depth: usize) {
    let pad = "  ".repeat(depth);
    let payload = value.payload().map(|p| hex(p.as_bytes())).unwrap_or_default();
    println!(
        "{pad}{:?}/{} count={} {payload}",
        value.shape(),
        value.component(),
        value.count()
    );
    match value {
        BinaryValue::Array(items) => items.iter().for_each(|v| print_node(v, depth + 1)),
        BinaryValue::Object(entries) => {
            for (key, v) in entries {
                println!("{pad}  key {key:?}");
                print_node(v, depth + 2);
            }
        }
        BinaryValue::Scalar(_) | BinaryValue::String(_) => {}
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let record: Value = [
        ("name", Value::from("tagwire ☕")),
        ("version", Value::from(1)),
        ("ratio", Value::from(0.75)),
        ("serial", Value::from(9_007_199_254_740_993_i64)),
        ("flags", Value::from(vec![true, false])),
        ("missing", Value::Undefined),
    ]
    .into_iter()
    .collect();
    let greeting = Value::from("hello");

    let mut buf = ByteBuffer::new();
    for value in [&record, &greeting] {
        let lifted = auto(value.clone());
        print_node(&lifted, 0);
        encode_into(&lifted, &mut buf)?;
        buf.set_cursor(buf.len());
    }
    println!("{} bytes, first header: {}", buf.len(), hex(&buf.as_bytes()[..HEADER_LEN]));

    buf.set_cursor(0);
    let first = to_native(&decode(&buf)?);
    let first_end = buf.cursor();
    let second = to_native(&decode(&buf)?);
    println!("decoded: {first}");
    println!("decoded: {second}");
    assert_eq!(second, greeting);

    let truncated = ByteBuffer::from(&buf.as_bytes()[..first_end - 1]);
    match decode(&truncated) {
        Ok(_) => println!("truncated record decoded"),
        Err(e) => println!("truncated record rejected: {e}"),
    }
    Ok(())
}
