//! Plugin group definitions for the glyph projector application
//!
//! The simulation and its rendering are registered as separate groups

use bevy::app::{PluginGroup, PluginGroupBuilder};

/// Plugin group for the simulation side of the app
#[derive(Default)]
pub struct CorePluginGroup;

impl PluginGroup for CorePluginGroup {
    fn build(self) -> PluginGroupBuilder {
        use crate::systems::simulation::SimulationPlugin;

        PluginGroupBuilder::start::<Self>().add(SimulationPlugin)
    }
}

/// Plugin group for rendering functionality
#[derive(Default)]
pub struct RenderingPluginGroup;

impl PluginGroup for RenderingPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        use crate::rendering::{cameras::CameraPlugin, ProjectorRenderingPlugin};

        PluginGroupBuilder::start::<Self>()
            .add(CameraPlugin) // Must be first so the renderer can find the camera
            .add(ProjectorRenderingPlugin)
    }
}
