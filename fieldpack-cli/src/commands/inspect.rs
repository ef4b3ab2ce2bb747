use anyhow::{Context, Result};
use colored::*;
use fieldpack_core::{CompiledFormat, Mode};

pub fn execute(format: &str, json: bool) -> Result<()> {
    let compiled = CompiledFormat::new(format)
        .with_context(|| format!("Failed to compile format: {:?}", format))?;

    if json {
        let rendered = serde_json::to_string_pretty(compiled.spec())?;
        println!("{rendered}");
        return Ok(());
    }

    let mode = match compiled.mode() {
        Mode::NativeAligned => "native, aligned",
        Mode::NativePacked => "native, packed",
        Mode::LittleEndian => "little-endian, packed",
        Mode::BigEndian => "big-endian, packed",
    };

    println!("\n=== Compiled Format ===");
    println!("Format:         {:?}", format);
    println!("Mode:           {}", mode);
    println!("Encoded size:   {} bytes", compiled.size());
    println!("Values:         {}", compiled.arity());

    println!("\n=== Fields ===");
    for field in &compiled.spec().fields {
        let size = field.size(compiled.mode());
        let code = format!("'{}'", field.code);
        println!(
            "  {}  {:>4} x{:<6} {:>5} bytes  {} value(s)",
            "•".green(),
            code,
            field.count,
            size,
            field.arity()
        );
    }

    println!(
        "\n{} Format compiles to {} bytes per record",
        "✓".green(),
        compiled.size()
    );

    Ok(())
}
