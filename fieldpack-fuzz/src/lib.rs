//! Fuzzing placeholder for fieldpack-core parser and decoder
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_parse

pub fn fuzz_parse(data: &[u8]) {
    // Try to parse - should never panic
    if let Ok(format) = core::str::from_utf8(data) {
        let _ = fieldpack_core::parser::parse(format);
    }
}

pub fn fuzz_unpack(data: &[u8]) {
    // Split the input into a format and a buffer, then try to unpack -
    // should never panic
    let Some(split) = data.first().map(|&b| b as usize) else {
        return;
    };
    let rest = &data[1..];
    if split > rest.len() {
        return;
    }
    let (format, buf) = rest.split_at(split);
    if let Ok(format) = core::str::from_utf8(format) {
        let _ = fieldpack_core::unpack(format, buf);
        let _ = fieldpack_core::unpack_from(format, buf, 1);
        if let Ok(records) = fieldpack_core::iter_unpack(format, buf) {
            let _ = records.count();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_parse_empty() {
        fuzz_parse(&[]);
    }

    #[test]
    fn test_fuzz_parse_random() {
        fuzz_parse(b"<3z9 99");
    }

    #[test]
    fn test_fuzz_unpack_empty() {
        fuzz_unpack(&[]);
    }

    #[test]
    fn test_fuzz_unpack_random() {
        fuzz_unpack(&[3, b'<', b'2', b'H', 0x01, 0x02, 0x03, 0x04]);
    }
}
