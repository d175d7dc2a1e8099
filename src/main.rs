//! # tgmark CLI
//!
//! Command-line interface for the tgmark library.

use std::io::IsTerminal;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use tgmark::TgmarkError;
use tgmark::archive::load_archive;
use tgmark::cli::{Args, LogLevel};
use tgmark::convert::convert_archive;
use tgmark::report::LogReporter;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.log_level);

    if let Err(e) = run(&args) {
        match e {
            TgmarkError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                eprintln!(
                    "❌ Error: {} not found.\nPlease, specify the right file",
                    args.json.display()
                );
            }
            _ => eprintln!("❌ Error: {}", e),
        }
        process::exit(1);
    }
}

/// Sets up the `tracing` subscriber.
///
/// `--log-level` wins over `RUST_LOG`; without either, only warnings and
/// errors are shown.
fn init_logging(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.as_filter()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::default().as_filter())),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(args: &Args) -> Result<(), TgmarkError> {
    let start = Instant::now();
    let config = args.convert_config();

    println!("📦 tgmark v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.json.display());
    println!("💾 Output:  {}", config.out_dir.display());
    println!();

    let archive = load_archive(&args.json)?;
    if let Some(name) = &archive.name {
        println!("📖 Chat:    {}", name);
    }
    println!("⏳ Converting {} records...", archive.messages.len());

    let stats = convert_archive(&archive, &config, &LogReporter)?;

    println!();
    println!("✅ Done! Posts saved to {}", config.out_dir.display());
    println!();
    println!("📊 Summary:");
    println!("   Records:  {}", stats.total);
    println!("   Written:  {} ({:.1}%)", stats.written, stats.written_ratio());
    println!("   Ignored:  {}", stats.ignored);
    println!("   Skipped:  {}", stats.skipped);
    println!("   Time:     {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
