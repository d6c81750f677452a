//! Plugin configuration for the glyph projector
//!
//! Sets up Bevy's default plugins and the logging filter.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

/// Log filter for the windowed app, chosen per build profile
pub fn configure_logging() -> LogPlugin {
    #[cfg(debug_assertions)]
    {
        // Projector debug output, engine noise suppressed
        LogPlugin {
            level: Level::INFO,
            filter: "glyph_projector=debug,bevy_render=warn,bevy_winit=warn,wgpu=warn,winit=warn"
                .to_string(),
            ..default()
        }
    }

    #[cfg(not(debug_assertions))]
    {
        // Only projector info lines and engine warnings
        LogPlugin {
            level: Level::WARN,
            filter: "glyph_projector=info,bevy=warn,wgpu=error,winit=error".to_string(),
            ..default()
        }
    }
}

/// Bevy's default plugins with the projector log filter installed
pub fn configure_default_plugins() -> bevy::app::PluginGroupBuilder {
    DefaultPlugins.set(configure_logging())
}
