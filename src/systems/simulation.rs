//! Fixed-timestep simulation of the projector
//!
//! The projector advances on Bevy's `FixedUpdate` schedule so the effect
//! runs at the same speed regardless of frame rate. Rendering reads the
//! overstep fraction of `Time<Fixed>` to interpolate between ticks.

use crate::projector::Projector;
use bevy::prelude::*;

/// Simulation ticks per second
pub const TICK_RATE_HZ: f64 = 40.0;

/// The projector instance driven by the app
#[derive(Resource, Deref, DerefMut)]
pub struct ProjectorState(pub Projector);

impl ProjectorState {
    pub fn new(projector: Projector) -> Self {
        Self(projector)
    }
}

/// Seed the projector's random source was created with
#[derive(Resource, Debug, Clone, Copy)]
pub struct ProjectorSeed(pub u64);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_systems(FixedUpdate, tick_projector);
    }
}

fn tick_projector(mut projector: ResMut<ProjectorState>) {
    projector.update();
    let tick = projector.tick_count();
    if tick % 400 == 0 {
        let stats = projector.stats();
        debug!(
            "tick {}: {} live glyphs, {} pooled, {} cursors",
            tick, stats.live_glyphs, stats.pooled_glyphs, stats.cursors
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::ProjectorSettings;

    #[test]
    fn test_tick_system_advances_projector() {
        let mut app = App::new();
        app.insert_resource(ProjectorState::new(Projector::from_seed(
            ProjectorSettings::default(),
            5,
        )));
        app.add_systems(Update, tick_projector);

        app.update();
        app.update();
        assert_eq!(app.world().resource::<ProjectorState>().tick_count(), 2);
    }
}
