use std::fs;
use tempfile::tempdir;

use fieldpack_cli::commands::{calcsize, inspect, iter, unpack};
use fieldpack_core::{pack, Value};

#[test]
fn unpack_record_from_file() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("data.bin");

    let wire = pack("<Hd", &[Value::Uint(7), Value::Float(1.5)]).unwrap();
    fs::write(&in_path, &wire).unwrap();

    unpack::execute("<Hd", in_path.to_str().unwrap(), 0, false).unwrap();
}

#[test]
fn unpack_respects_offset() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("data.bin");

    let mut framed = vec![0xaau8; 3];
    framed.extend_from_slice(&pack("<H", &[Value::Uint(9)]).unwrap());
    fs::write(&in_path, &framed).unwrap();

    unpack::execute("<H", in_path.to_str().unwrap(), 3, false).unwrap();

    // Offset past the data is a buffer error
    assert!(unpack::execute("<H", in_path.to_str().unwrap(), 4, false).is_err());
}

#[test]
fn unpack_hex_input() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("data.hex");

    fs::write(&in_path, "01 00 02 00\n").unwrap();

    unpack::execute("<HH", in_path.to_str().unwrap(), 0, true).unwrap();
    assert!(unpack::execute("<HHH", in_path.to_str().unwrap(), 0, true).is_err());
}

#[test]
fn iter_requires_whole_records() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("data.bin");

    let mut stream = Vec::new();
    for n in 1u64..=3 {
        stream.extend_from_slice(&pack("<H", &[Value::Uint(n)]).unwrap());
    }
    fs::write(&in_path, &stream).unwrap();

    iter::execute("<H", in_path.to_str().unwrap(), false).unwrap();

    fs::write(&in_path, &stream[..5]).unwrap();
    assert!(iter::execute("<H", in_path.to_str().unwrap(), false).is_err());
}

#[test]
fn calcsize_and_inspect_compile_or_fail() {
    calcsize::execute("<2HI").unwrap();
    assert!(calcsize::execute("<2").is_err());

    inspect::execute(">4sd", false).unwrap();
    inspect::execute(">4sd", true).unwrap();
    assert!(inspect::execute("<n", true).is_err());
}
