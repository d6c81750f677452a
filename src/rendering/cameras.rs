//! Camera setup for the projector view
//!
//! A single 2D camera that can be dragged around with `bevy_pancam`. Its
//! translation is the camera offset handed to the projector's render pass.

use bevy::prelude::*;
use bevy_pancam::{PanCam, PanCamPlugin};

/// Marker for the camera looking at the projection
#[derive(Component)]
pub struct ProjectorCamera;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        ProjectorCamera,
        PanCam {
            grab_buttons: vec![MouseButton::Left, MouseButton::Middle],
            // Primitives are laid out in screen pixels, so zoom stays fixed
            zoom_to_cursor: false,
            min_scale: 1.0,
            max_scale: 1.0,
            ..default()
        },
    ));
    debug!("Projector camera spawned");
}
