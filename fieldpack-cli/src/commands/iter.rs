use crate::commands::unpack::read_input;
use crate::commands::values::values_to_json;
use anyhow::{Context, Result};
use fieldpack_core::CompiledFormat;
use tracing::info;

pub fn execute(format: &str, input: &str, hex_input: bool) -> Result<()> {
    info!("Iterating {} with format {:?}", input, format);

    let compiled = CompiledFormat::new(format)
        .with_context(|| format!("Failed to compile format: {:?}", format))?;

    let data = read_input(input, hex_input)?;

    let records = compiled
        .iter_unpack(&data)
        .with_context(|| format!("Input is not a whole number of {}-byte records", compiled.size()))?;

    let mut count = 0usize;
    for values in records {
        println!("{}", serde_json::to_string(&values_to_json(&values))?);
        count += 1;
    }

    info!("Unpacked {} record(s)", count);
    Ok(())
}
