use std::io::Cursor;
use std::sync::Once;

use cachesim_core::Simulator;
use cachesim_core::common::SimError;
use cachesim_core::config::{AddressingMode, CacheConfig, Config, MemoryConfig};
use cachesim_core::report::Reporter;
use cachesim_core::trace::TraceReader;

/// Backing memory used by tests unless they need more: 1 MiB.
pub const TEST_MEMORY_BYTES: usize = 1 << 20;

/// Builds a modulo-addressed configuration over [`TEST_MEMORY_BYTES`].
pub fn config(size_kib: usize, ways: usize, block_size: usize) -> Config {
    Config {
        cache: CacheConfig::new(size_kib, ways, block_size),
        memory: MemoryConfig {
            size_bytes: TEST_MEMORY_BYTES,
        },
    }
}

/// Same as [`config`] with mask addressing.
pub fn mask_config(size_kib: usize, ways: usize, block_size: usize) -> Config {
    let mut config = config(size_kib, ways, block_size);
    config.cache.addressing = AddressingMode::Mask;
    config
}

static TRACING: Once = Once::new();

/// Installs a test-friendly subscriber once per process. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Output and final state of a replay.
#[derive(Debug)]
pub struct Replay {
    pub sim: Simulator,
    pub output: String,
    pub result: Result<(), SimError>,
}

impl Replay {
    /// Output split into lines.
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }
}

/// Replays `trace` through a fresh simulator built from `config`.
pub fn replay(config: &Config, trace: &str) -> Replay {
    init_tracing();
    let mut sim = Simulator::new(config).unwrap();
    let mut reader = TraceReader::new(Cursor::new(trace.as_bytes()));
    let mut reporter = Reporter::new(Vec::new());
    let result = sim.run(&mut reader, &mut reporter);
    let output = String::from_utf8(reporter.into_inner()).unwrap();
    Replay {
        sim,
        output,
        result,
    }
}

/// Replays `trace` and panics if the run fails.
pub fn replay_ok(config: &Config, trace: &str) -> Replay {
    let replay = replay(config, trace);
    if let Err(e) = &replay.result {
        panic!("replay failed: {e}\noutput so far:\n{}", replay.output);
    }
    replay
}
