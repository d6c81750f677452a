//! Command line interface for the glyph projector
//!
//! Handles parsing command line arguments and provides validation for
//! user inputs. CLI values override the user config file, which overrides
//! the built-in defaults.

use crate::core::config_file::ConfigFile;
use crate::projector::settings::validate_grid_size;
use crate::projector::ProjectorSettings;
use bevy::prelude::*;
use clap::Parser;

/// Glyph projector CLI arguments
///
/// Examples:
///   glyph-projector                          # Windowed, random seed
///   glyph-projector --seed 42 --effect 0.9   # Reproducible, dense matrices
///   glyph-projector --grid 120x64            # Larger grid
///   glyph-projector --headless 2000          # Simulate 2000 ticks, print stats
#[derive(Parser, Debug, Resource, Clone, Default)]
#[clap(
    name = "glyph-projector",
    version,
    about = "A holographic glyph projector effect built with Bevy",
    long_about = "Runs the glyph projector effect: a grid of self-propagating glyphs and wandering cursors. The simulation runs on a fixed timestep and is rendered with interpolation."
)]
pub struct CliArgs {
    /// Seed for the random source
    ///
    /// The same seed and settings always produce the same simulation.
    #[clap(long = "seed", short = 's', help = "Random seed (random if omitted)")]
    pub seed: Option<u64>,

    /// Effect intensity between 0 and 1
    #[clap(
        long = "effect",
        short = 'e',
        help = "Effect amount in [0, 1]",
        long_help = "Effect amount in [0, 1]. Scales the maximum size of glyph matrices and the projection jitter."
    )]
    pub effect: Option<f32>,

    /// Population target for single glyphs
    #[clap(long = "ideal-glyphs", help = "Ideal number of live glyphs")]
    pub ideal_glyphs: Option<usize>,

    /// Grid dimensions as WIDTHxHEIGHT
    #[clap(
        long = "grid",
        short = 'g',
        help = "Grid size, e.g. 80x48",
        long_help = "Grid size in cells as WIDTHxHEIGHT, e.g. 80x48. Each cell is 15 pixels."
    )]
    pub grid: Option<String>,

    /// Start with the projector switched off (toggle with V)
    #[clap(long = "hidden", help = "Start with the projector invisible")]
    pub hidden: bool,

    /// Run without a window for the given number of ticks
    #[clap(
        long = "headless",
        value_name = "TICKS",
        help = "Simulate TICKS ticks without a window and print stats as JSON"
    )]
    pub headless: Option<u64>,

    /// Write logs to the user log directory instead of the terminal
    #[clap(long = "log-to-file", help = "Redirect logs to the config log directory")]
    pub log_to_file: bool,

    /// Write a default settings.json into the user config directory and exit
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings"
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if let Some(effect) = self.effect {
            if !(0.0..=1.0).contains(&effect) {
                return Err(format!(
                    "Effect amount must be between 0 and 1, got {effect}"
                ));
            }
        }

        if let Some(grid) = &self.grid {
            parse_grid_size(grid)?;
        }

        Ok(())
    }

    /// Build projector settings from defaults, the config file and the CLI
    ///
    /// Priority order:
    /// 1. CLI arguments
    /// 2. Config file (~/.config/glyph-projector/settings.json)
    /// 3. Built-in defaults
    pub fn resolve_settings(&self, config: Option<&ConfigFile>) -> Result<ProjectorSettings, String> {
        let mut settings = ProjectorSettings::default();

        if let Some(config) = config {
            settings = config.apply(settings);
        }

        if let Some(grid) = &self.grid {
            settings = settings.with_grid_size(parse_grid_size(grid)?);
        }
        if let Some(effect) = self.effect {
            settings.effect_amount = effect;
        }
        if let Some(ideal) = self.ideal_glyphs {
            settings.ideal_glyph_count = ideal;
        }
        if self.hidden {
            settings.visible = false;
        }

        settings.validate()?;
        debug!("Resolved projector settings: {:?}", settings);
        Ok(settings)
    }
}

/// Parse `WIDTHxHEIGHT` into a grid size
pub fn parse_grid_size(value: &str) -> Result<IVec2, String> {
    let invalid = || {
        format!("Invalid grid size: '{value}'\nExpected WIDTHxHEIGHT, for example 80x48.")
    };

    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width: i32 = width.trim().parse().map_err(|_| invalid())?;
    let height: i32 = height.trim().parse().map_err(|_| invalid())?;

    let size = IVec2::new(width, height);
    validate_grid_size(size)?;
    Ok(size)
}
