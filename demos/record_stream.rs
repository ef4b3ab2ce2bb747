//! Iterating over a stream of fixed-size records with a compiled format

use fieldpack_core::{CompiledFormat, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fieldpack Record Stream Example\n");

    // Compile once, reuse for every record
    let record = CompiledFormat::new(">IHe")?;
    println!("Record size: {} bytes", record.size());

    // Build a stream of readings
    let mut stream = Vec::new();
    for n in 0..5u64 {
        let one = record.pack(&[
            Value::Uint(1000 + n),
            Value::Uint(n * 10),
            Value::Float(0.5 * n as f64),
        ])?;
        stream.extend_from_slice(&one);
    }
    println!("Stream: {} bytes", stream.len());

    // Walk it back out
    for (i, values) in record.iter_unpack(&stream)?.enumerate() {
        println!("record {}: {:?}", i, values);
    }

    Ok(())
}
