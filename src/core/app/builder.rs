//! Application builder and initialization
//!
//! This module provides the main app creation function

use super::plugins::{CorePluginGroup, RenderingPluginGroup};
use crate::core::cli::CliArgs;
use crate::projector::{Projector, ProjectorSettings};
use crate::systems::plugins::configure_default_plugins;
use crate::systems::simulation::{ProjectorSeed, ProjectorState};
use crate::systems::{exit_on_esc, log_projector_seed, toggle_projector_visibility};
use anyhow::Result;
use bevy::prelude::*;
use bevy::winit::WinitSettings;

pub const WINDOW_TITLE: &str = "Glyph Projector";

/// Backdrop behind the projection
pub const BACKGROUND_COLOR: Color = Color::srgb(0.015, 0.025, 0.035);

/// Creates a fully configured Bevy application hosting one projector.
///
/// `settings` are the already-resolved projector settings and `seed`
/// feeds the projector's random source.
pub fn create_app(cli_args: CliArgs, settings: ProjectorSettings, seed: u64) -> Result<App> {
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;

    let viewport = settings.viewport_size;
    let mut app = App::new();
    configure_resources(&mut app, cli_args, settings, seed);
    configure_window_plugins(&mut app, viewport);
    add_plugin_groups(&mut app);
    add_startup_and_exit_systems(&mut app);
    Ok(app)
}

/// Sets up application resources and configuration
fn configure_resources(app: &mut App, cli_args: CliArgs, settings: ProjectorSettings, seed: u64) {
    let projector = Projector::from_seed(settings, seed);

    app.insert_resource(cli_args)
        .insert_resource(ProjectorState::new(projector))
        .insert_resource(ProjectorSeed(seed))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        // The effect animates continuously, focused or not
        .insert_resource(WinitSettings::game());
}

/// Configure window and default plugins
fn configure_window_plugins(app: &mut App, viewport: Vec2) {
    let window_config = Window {
        title: WINDOW_TITLE.to_string(),
        resolution: (viewport.x, viewport.y).into(),
        resizable: false,
        ..default()
    };

    app.add_plugins(configure_default_plugins().set(WindowPlugin {
        primary_window: Some(window_config),
        ..default()
    }));
}

/// Add all plugin groups to the application
fn add_plugin_groups(app: &mut App) {
    debug!("Adding plugin groups...");
    app.add_plugins((CorePluginGroup, RenderingPluginGroup));
    debug!("All plugin groups added successfully");
}

/// Add startup and exit systems
fn add_startup_and_exit_systems(app: &mut App) {
    app.add_systems(Startup, log_projector_seed)
        .add_systems(Update, (exit_on_esc, toggle_projector_visibility));
}
