//! Sprite rendering for the projector
//!
//! Every frame the projector's draw primitives are turned into flat-colour
//! sprites. The interpolation fraction comes from the fixed timestep's
//! overstep, so motion stays smooth at any frame rate.

use crate::projector::DrawPrimitive;
use crate::rendering::cameras::ProjectorCamera;
use crate::systems::simulation::ProjectorState;
use bevy::prelude::*;

/// Marker for sprites spawned from draw primitives
#[derive(Component)]
pub struct ProjectorSprite;

pub struct ProjectorRenderingPlugin;

impl Plugin for ProjectorRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, render_projector);
    }
}

/// Rebuild the projector sprites for this frame
pub fn render_projector(
    mut commands: Commands,
    projector: Res<ProjectorState>,
    fixed_time: Res<Time<Fixed>>,
    camera_query: Query<&Transform, With<ProjectorCamera>>,
    existing_sprites: Query<Entity, With<ProjectorSprite>>,
) {
    // Clear last frame's sprites
    for entity in existing_sprites.iter() {
        commands.entity(entity).despawn();
    }

    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    let camera_offset = camera_transform.translation.truncate();
    let viewport = projector.settings().viewport_size;
    let fraction = fixed_time.overstep_fraction();

    for primitive in projector.render(fraction, camera_offset) {
        commands.spawn((
            Sprite::from_color(primitive.tinted_color(), primitive.size),
            primitive_transform(&primitive, camera_offset, viewport),
            ProjectorSprite,
        ));
    }
}

/// Map a primitive's screen rectangle to a centred world transform
pub fn primitive_transform(primitive: &DrawPrimitive, camera_offset: Vec2, viewport: Vec2) -> Transform {
    let world = screen_to_world(primitive.center(), camera_offset, viewport);
    Transform::from_translation(world.extend(primitive.kind.layer()))
}

/// Screen pixels (origin bottom-left) to world coordinates for a camera at
/// `camera_offset`
pub fn screen_to_world(screen: Vec2, camera_offset: Vec2, viewport: Vec2) -> Vec2 {
    screen - viewport * 0.5 + camera_offset
}
