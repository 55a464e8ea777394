//! small — runs the hop simulation on a six-node ring through the facade.
//!
//! Usage: `small [SETTINGS]` (default `demos/small/data/settings.json`).
//! Set `RUST_LOG=debug` to see routing decisions; traced participants log
//! every hop at `info`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use hs_module::NativeModule;

const DEFAULT_SETTINGS: &str = "demos/small/data/settings.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_SETTINGS), PathBuf::from);

    let t0 = Instant::now();
    let mut module = NativeModule::new("small")?;
    module
        .initialize(&settings_path)
        .with_context(|| format!("initializing from {}", settings_path.display()))?;
    let elapsed = t0.elapsed();

    let settings = module.settings();
    let settings = settings.get();
    let mut names: Vec<String> = settings.participants.explicit.iter().map(|p| p.name.clone()).collect();
    let first_random = names.len();
    names.extend((first_random..first_random + settings.participants.random_count).map(|i| format!("participant-{i}")));

    println!("map: {}", settings.current_map_name().unwrap_or("?"));
    println!("{:<16} {:>5}", "participant", "hops");
    for name in &names {
        println!("{:<16} {:>5}", name, module.hop_count(name)?);
    }
    println!("\ninitialized in {:.1} ms", elapsed.as_secs_f64() * 1e3);
    Ok(())
}
