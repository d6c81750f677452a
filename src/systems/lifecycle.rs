//! App lifecycle systems: exit, visibility toggle and start-up logging

use crate::systems::simulation::{ProjectorSeed, ProjectorState};
use bevy::prelude::*;

/// Quit when Escape is pressed
pub fn exit_on_esc(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut app_exit_events: EventWriter<AppExit>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        app_exit_events.write(AppExit::Success);
    }
}

/// Switch the projector on and off with V
pub fn toggle_projector_visibility(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut projector: ResMut<ProjectorState>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyV) {
        let visible = !projector.is_visible();
        projector.set_visible(visible);
        info!("Projector {}", if visible { "on" } else { "off" });
    }
}

/// Log the seed so a session can be reproduced with --seed
pub fn log_projector_seed(seed: Res<ProjectorSeed>, projector: Res<ProjectorState>) {
    let size = projector.settings().grid_size;
    info!(
        "Projector running with seed {} on a {}x{} grid",
        seed.0, size.x, size.y
    );
}
