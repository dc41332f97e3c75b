use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rangepack::text::{format_ranges, parse_ranges, RangeFormatter};
use rangepack::{compress_with_stats, decompress, merged_ranges, to_base64, CompressOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rangepack")]
#[command(about = "Compress sorted integer ranges into a compact bitstream")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress ranges and print the base64 result
    Compress {
        /// Maximum compressed size in bytes
        #[arg(long, default_value_t = rangepack::DEFAULT_MAX_SIZE)]
        max_size: usize,

        /// Values or ranges such as `5` or `3-7`, in ascending order
        #[arg(required = true, allow_hyphen_values = true)]
        ranges: Vec<String>,
    },

    /// Decompress base64 input and print the ranges
    Decompress {
        /// Base64-encoded compressed data
        input: String,
    },

    /// Compress, decompress and show every stage
    Roundtrip {
        #[arg(required = true, allow_hyphen_values = true)]
        ranges: Vec<String>,
    },

    /// Validate and print the merged ranges
    Normalize {
        #[arg(required = true, allow_hyphen_values = true)]
        ranges: Vec<String>,
    },
}

fn setup_logging(verbose: u8) {
    let directives = match verbose {
        0 => "warn",
        1 => "rangepack=debug",
        _ => "rangepack=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_compress(ranges: &[String], max_size: usize) -> Result<()> {
    let input = parse_ranges(ranges)?;
    let options = CompressOptions::new().with_max_size(max_size);
    let (bytes, stats) = compress_with_stats(input, &options).context("compression failed")?;
    tracing::info!(
        runs = stats.runs,
        bytes = stats.bytes,
        bits_per_run = stats.bits_per_run(),
        "compressed"
    );
    println!("{}", to_base64(&bytes));
    Ok(())
}

fn run_decompress(input: &str) -> Result<()> {
    let mut formatter = RangeFormatter::new();
    decompress(input, |start, end| formatter.push(start, end))
        .context("decompression failed")?;
    println!("{}", formatter.finish());
    Ok(())
}

fn run_roundtrip(ranges: &[String]) -> Result<()> {
    let input = parse_ranges(ranges)?;
    println!("Input ranges: {input:?}");

    let (bytes, stats) = compress_with_stats(input, &CompressOptions::default())?;
    println!("Compressed data: {bytes:?}");
    println!("Compressed base64: {}", to_base64(&bytes));
    println!(
        "Compressed size: {} bytes ({} codewords, {:.2} bits per run)",
        stats.bytes,
        stats.codewords,
        stats.bits_per_run()
    );

    let mut decoded = Vec::new();
    decompress(&bytes, |start, end| decoded.push((start, end)))?;
    println!("Decompressed: {}", format_ranges(decoded));
    Ok(())
}

fn run_normalize(ranges: &[String]) -> Result<()> {
    let merged = merged_ranges(parse_ranges(ranges)?)?;
    println!(
        "{}",
        format_ranges(merged.into_iter().map(|r| (*r.start(), *r.end())))
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Compress { max_size, ranges } => run_compress(&ranges, max_size),
        Commands::Decompress { input } => run_decompress(&input),
        Commands::Roundtrip { ranges } => run_roundtrip(&ranges),
        Commands::Normalize { ranges } => run_normalize(&ranges),
    }
}
