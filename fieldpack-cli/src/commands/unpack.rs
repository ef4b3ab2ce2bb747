use crate::commands::values::values_to_json;
use anyhow::{Context, Result};
use fieldpack_core::CompiledFormat;
use std::fs;
use std::io::{self, Read};
use tracing::info;

pub fn execute(format: &str, input: &str, offset: usize, hex_input: bool) -> Result<()> {
    info!("Unpacking {} with format {:?}", input, format);

    let compiled = CompiledFormat::new(format)
        .with_context(|| format!("Failed to compile format: {:?}", format))?;

    let data = read_input(input, hex_input)?;
    info!("Input size: {} bytes", data.len());

    let values = compiled
        .unpack_from(&data, offset)
        .with_context(|| format!("Failed to unpack record at offset {}", offset))?;

    println!("{}", serde_json::to_string(&values_to_json(&values))?);
    Ok(())
}

/// Read packed bytes from a file or stdin, optionally as hex text
pub(crate) fn read_input(input: &str, hex_input: bool) -> Result<Vec<u8>> {
    let raw = if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?
    };

    if hex_input {
        let text = String::from_utf8(raw).context("Hex input is not valid UTF-8")?;
        let stripped: String = text.split_whitespace().collect();
        hex::decode(stripped).context("Invalid hex input")
    } else {
        Ok(raw)
    }
}
