//! Basic packing example

use fieldpack_core::{calcsize, pack, unpack, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fieldpack Basic Packing Example\n");

    // A little-endian sensor reading: id, temperature, flags
    let format = "<Hd?";
    println!("Format: {:?} ({} bytes)", format, calcsize(format)?);

    let values = vec![Value::Uint(42), Value::Float(21.75), Value::Bool(true)];
    let wire = pack(format, &values)?;

    println!("Packed: {:02x?}", wire.as_ref());

    let decoded = unpack(format, &wire)?;
    println!("Unpacked: {:?}", decoded);

    assert_eq!(decoded, values);
    Ok(())
}
