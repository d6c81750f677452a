//! Application runner logic
//!
//! Handles the different ways to run the glyph projector: the Bevy window,
//! a headless simulation, or one-off config initialization.

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::logging;
use crate::projector::{Projector, ProjectorSettings, ProjectorStats};
use anyhow::Result;
use tracing::info;

/// Ticks between progress lines in headless runs
const HEADLESS_REPORT_INTERVAL: u64 = 500;

/// Handle special CLI flags and delegate to the appropriate runner
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory();
    }

    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let config = ConfigFile::load();
    let settings = cli_args
        .resolve_settings(config.as_ref())
        .map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;
    let seed = cli_args.seed.unwrap_or_else(rand::random);

    if let Some(ticks) = cli_args.headless {
        // Keep the guard alive until the run is over so file logs flush
        let _log_guard = logging::init_headless_logging(cli_args.log_to_file)?;
        let stats = run_headless(settings, seed, ticks);
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if cli_args.log_to_file {
        if let Err(e) = logging::setup_log_redirection() {
            eprintln!("Failed to setup log redirection: {}", e);
        }
    }

    let mut app = crate::core::app::create_app(cli_args, settings, seed)?;
    app.run();
    Ok(())
}

/// Simulate `ticks` ticks without rendering and return the final stats
pub fn run_headless(settings: ProjectorSettings, seed: u64, ticks: u64) -> ProjectorStats {
    info!("Headless run: {} ticks, seed {}", ticks, seed);
    let mut projector = Projector::from_seed(settings, seed);

    for _ in 0..ticks {
        projector.update();
        if projector.tick_count() % HEADLESS_REPORT_INTERVAL == 0 {
            let stats = projector.stats();
            info!(
                "tick {}: {} live glyphs ({} matrices), {} pooled, {} cursors",
                stats.tick,
                stats.live_glyphs,
                stats.glyph_matrices,
                stats.pooled_glyphs,
                stats.cursors
            );
        }
    }

    projector.stats()
}
