#![no_main]
use libfuzzer_sys::fuzz_target;
use tagwire::{ByteBuffer, DecodeOptions, EncodeError, decode_with_options, encode};

const HEADER: usize = 1; // 1 flag byte

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let options = DecodeOptions {
        // Take two bits of the flags, and map them to a nesting limit.
        max_depth: match flags & 3 {
            0 => None,
            1 => Some(0),
            2 => Some(8),
            _ => Some(tagwire::DEFAULT_MAX_DEPTH),
        },
        strict_utf8: flags & 4 != 0,
    };
    let buf = ByteBuffer::from(&data[HEADER..]);

    let Ok(value) = decode_with_options(&buf, &options) else {
        return;
    };
    assert!(buf.cursor() <= buf.len());

    // The first decode normalizes the stream; from then on the value is
    // stable under another encode and decode.
    let again = match encode(&value) {
        Ok(again) => again,
        // Only reachable with the depth check disabled.
        Err(EncodeError::DepthLimitExceeded { .. }) if options.max_depth.is_none() => return,
        Err(e) => panic!("decoded value failed to re-encode: {e}"),
    };
    let reread = decode_with_options(&again, &options).expect("re-encoded value decodes");
    assert_eq!(reread, value);
    assert_eq!(again.remaining(), 0);
}

fuzz_target!(|data: &[u8]| decoder(data));
