use anyhow::{Context, Result};
use fieldpack_core::CompiledFormat;
use tracing::info;

pub fn execute(format: &str) -> Result<()> {
    let compiled = CompiledFormat::new(format)
        .with_context(|| format!("Failed to compile format: {:?}", format))?;

    info!(
        "Format {:?}: {} bytes, {} values",
        format,
        compiled.size(),
        compiled.arity()
    );

    println!("{}", compiled.size());
    Ok(())
}
