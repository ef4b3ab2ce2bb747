use crate::commands::values::values_from_json;
use anyhow::{Context, Result};
use fieldpack_core::CompiledFormat;
use std::fs;
use std::io::{self, Read};
use tracing::info;

pub fn execute(format: &str, input: &str, output: Option<&str>) -> Result<()> {
    info!("Packing {} with format {:?}", input, format);

    let compiled = CompiledFormat::new(format)
        .with_context(|| format!("Failed to compile format: {:?}", format))?;

    // Read input JSON (file or stdin)
    let content = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input))?
    };

    let json: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse JSON input")?;

    // Accept either one record (array of values) or many (array of arrays)
    let records: Vec<Vec<fieldpack_core::Value>> = match json.as_array() {
        Some(items) if items.iter().all(|i| i.is_array()) => items
            .iter()
            .map(values_from_json)
            .collect::<Result<_>>()?,
        _ => vec![values_from_json(&json)?],
    };

    info!("Found {} record(s) to pack", records.len());

    let mut output_data = Vec::with_capacity(records.len() * compiled.size());
    for (i, record) in records.iter().enumerate() {
        let encoded = compiled
            .pack(record)
            .with_context(|| format!("Failed to pack record {}", i))?;
        output_data.extend_from_slice(&encoded);
    }

    match output {
        Some(path) => {
            fs::write(path, &output_data)
                .with_context(|| format!("Failed to write output file: {}", path))?;
            info!(
                "Successfully packed {} record(s) ({} bytes total) to {}",
                records.len(),
                output_data.len(),
                path
            );
        }
        None => println!("{}", hex::encode(&output_data)),
    }

    Ok(())
}
