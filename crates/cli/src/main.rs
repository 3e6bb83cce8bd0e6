//! Cache simulator CLI.
//!
//! Replays a load/store trace against a single set-associative cache and
//! prints one line per replacement and per access to stdout:
//!
//! ```text
//! replacement 0x<addr> dirty|clean
//! load 0x<addr> hit|miss <hex-data>
//! store 0x<addr> hit|miss
//! ```
//!
//! Diagnostics, logs (`RUST_LOG`), and the optional statistics summary go to
//! stderr so they never mix with the trace output.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{AddressingMode, CacheConfig, Config, MemoryConfig};
use cachesim_core::report::Reporter;
use cachesim_core::trace::TraceReader;
use cachesim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator (FIFO, write-back, write-allocate)",
    long_about = "Replay a load/store trace against a set-associative cache.\n\nExamples:\n  cachesim traces/simple.txt 1 1 64\n  cachesim traces/long.txt 4 2 32 --addressing mask --stats text"
)]
struct Cli {
    /// Trace file to replay.
    trace: PathBuf,

    /// Total cache size in KiB.
    cache_size_kb: usize,

    /// Associativity (blocks per set).
    ways: usize,

    /// Block size in bytes.
    block_size: usize,

    /// Backing memory size in bytes.
    #[arg(long, default_value_t = MemoryConfig::default().size_bytes)]
    memory_bytes: usize,

    /// Address decomposition: `modulo` works for any geometry, `mask`
    /// requires power-of-two block size and set count.
    #[arg(long, value_enum, default_value_t = Addressing::Modulo)]
    addressing: Addressing,

    /// Print run statistics to stderr after the trace completes.
    #[arg(long, value_enum)]
    stats: Option<StatsFormat>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Addressing {
    Modulo,
    Mask,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatsFormat {
    Text,
    Json,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            cache: CacheConfig {
                addressing: match self.addressing {
                    Addressing::Modulo => AddressingMode::Modulo,
                    Addressing::Mask => AddressingMode::Mask,
                },
                ..CacheConfig::new(self.cache_size_kb, self.ways, self.block_size)
            },
            memory: MemoryConfig {
                size_bytes: self.memory_bytes,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Builds the simulator, replays the trace, and prints statistics if asked.
///
/// Stdout is flushed before any error is returned, so every line produced
/// before a fatal trace error is still visible.
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.config();
    tracing::debug!(?config, "configuration");

    let mut sim = Simulator::new(&config)?;
    let mut trace = TraceReader::open(&cli.trace)
        .map_err(|e| format!("could not open trace '{}': {e}", cli.trace.display()))?;

    let stdout = io::stdout();
    let mut reporter = Reporter::new(BufWriter::new(stdout.lock()));
    let result = sim.run(&mut trace, &mut reporter);
    reporter.flush()?;
    result?;

    if let Some(format) = cli.stats {
        let mut err = io::stderr().lock();
        match format {
            StatsFormat::Text => sim.stats().print(&mut err)?,
            StatsFormat::Json => {
                serde_json::to_writer_pretty(&mut err, sim.stats())?;
                writeln!(err)?;
            }
        }
    }
    Ok(())
}
