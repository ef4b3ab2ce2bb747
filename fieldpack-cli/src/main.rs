mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fieldpack")]
#[command(about = "Fieldpack - Pack and unpack binary struct formats", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the encoded size of a format
    Calcsize {
        /// Format string, e.g. "<2HI" or ">4sd"
        format: String,
    },

    /// Show the compiled field table of a format
    Inspect {
        /// Format string to compile
        format: String,

        /// Emit the compiled spec as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pack JSON values into binary records
    Pack {
        /// Format string describing one record
        format: String,

        /// Input JSON file with an array of values ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output file for the packed bytes (omit to print hex on stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Unpack one binary record into JSON values
    Unpack {
        /// Format string describing the record
        format: String,

        /// Input file with packed bytes ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Byte offset of the record within the input
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Treat the input as hex text instead of raw bytes
        #[arg(long)]
        hex_input: bool,
    },

    /// Unpack a stream of back-to-back records, one JSON line each
    Iter {
        /// Format string describing one record
        format: String,

        /// Input file with packed records ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Treat the input as hex text instead of raw bytes
        #[arg(long)]
        hex_input: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Calcsize { format } => commands::calcsize::execute(&format),

        Commands::Inspect { format, json } => commands::inspect::execute(&format, json),

        Commands::Pack {
            format,
            input,
            output,
        } => commands::pack::execute(&format, &input, output.as_deref()),

        Commands::Unpack {
            format,
            input,
            offset,
            hex_input,
        } => commands::unpack::execute(&format, &input, offset, hex_input),

        Commands::Iter {
            format,
            input,
            hex_input,
        } => commands::iter::execute(&format, &input, hex_input),
    }
}
