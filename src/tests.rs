#![allow(clippy::assertions_on_constants)]

#[cfg(test)]
mod procreation_tests {
    use crate::projector::{Projector, ProjectorSettings};
    use bevy::math::IVec2;

    /// Quiet projector with no population pressure, so only scheduled
    /// procreation happens
    fn scripted_projector(size: i32, seed: u64) -> Projector {
        let mut settings = ProjectorSettings::default()
            .with_grid_size(IVec2::splat(size))
            .quiet();
        settings.ideal_glyph_count = 0;
        Projector::from_seed(settings, seed)
    }

    fn add_blocker(projector: &mut Projector, pos: IVec2) {
        let id = projector.add_glyph_matrix_at(pos).unwrap();
        projector.glyph_mut(id).unwrap().core_mut().lifetime = 1_000;
    }

    #[test]
    fn test_offspring_lands_in_only_vacant_neighbor_on_schedule() {
        let mut projector = scripted_projector(10, 3);
        let parent = projector.add_single_glyph_at(IVec2::new(5, 5)).unwrap();
        projector
            .glyph_mut(parent)
            .and_then(|glyph| glyph.as_single_mut())
            .unwrap()
            .set_schedule(50, Some(20));

        for blocked in [IVec2::new(5, 6), IVec2::new(4, 5), IVec2::new(5, 4)] {
            add_blocker(&mut projector, blocked);
        }

        let child_cell = IVec2::new(6, 5);
        for _ in 0..19 {
            projector.update();
        }
        assert!(projector.grid().is_vacant(child_cell));

        projector.update();
        let child = projector.grid().get(child_cell).expect("child should be placed");
        assert_ne!(child, parent);
        assert!(projector.glyph(child).unwrap().as_single().is_some());
        assert_eq!(projector.live_glyph_count(), 5);
    }

    #[test]
    fn test_surrounded_glyph_does_not_procreate() {
        let mut projector = scripted_projector(10, 11);
        let parent = projector.add_single_glyph_at(IVec2::new(2, 2)).unwrap();
        projector
            .glyph_mut(parent)
            .and_then(|glyph| glyph.as_single_mut())
            .unwrap()
            .set_schedule(40, Some(5));

        for blocked in [IVec2::new(2, 3), IVec2::new(3, 2), IVec2::new(2, 1), IVec2::new(1, 2)] {
            add_blocker(&mut projector, blocked);
        }

        for _ in 0..10 {
            projector.update();
        }
        assert_eq!(projector.live_glyph_count(), 5);
        assert!(projector.check_invariants().is_ok());
    }

    #[test]
    fn test_offspring_never_wraps_across_grid_edge() {
        let mut projector = scripted_projector(6, 5);
        let parent = projector.add_single_glyph_at(IVec2::new(0, 0)).unwrap();
        projector
            .glyph_mut(parent)
            .and_then(|glyph| glyph.as_single_mut())
            .unwrap()
            .set_schedule(30, Some(3));

        // Both in-bounds neighbours are taken; the rest lie off the grid
        add_blocker(&mut projector, IVec2::new(0, 1));
        add_blocker(&mut projector, IVec2::new(1, 0));

        for _ in 0..3 {
            projector.update();
        }
        assert!(projector.grid().is_vacant(IVec2::new(5, 0)));
        assert!(projector.grid().is_vacant(IVec2::new(0, 5)));
        assert_eq!(projector.live_glyph_count(), 3);
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use crate::projector::{Projector, ProjectorSettings};
    use bevy::math::IVec2;

    fn quiet(size: i32) -> Projector {
        let mut settings = ProjectorSettings::default()
            .with_grid_size(IVec2::splat(size))
            .quiet();
        settings.ideal_glyph_count = 0;
        Projector::from_seed(settings, 21)
    }

    #[test]
    fn test_single_glyph_retires_into_pool_after_lifetime() {
        let mut projector = quiet(8);
        let pos = IVec2::new(3, 3);
        let id = projector.add_single_glyph_at(pos).unwrap();
        projector
            .glyph_mut(id)
            .and_then(|glyph| glyph.as_single_mut())
            .unwrap()
            .set_schedule(30, None);

        for _ in 0..29 {
            projector.update();
            let core = projector.glyph(id).unwrap().core();
            assert!(core.age <= core.lifetime);
        }
        assert!(projector.glyph(id).unwrap().is_active());

        projector.update();
        assert!(!projector.glyph(id).unwrap().is_active());
        assert!(projector.grid().is_vacant(pos));
        assert_eq!(projector.pooled_glyph_count(), 1);
        assert_eq!(projector.live_glyph_count(), 0);
    }

    #[test]
    fn test_matrix_is_destroyed_after_lifetime() {
        let mut projector = quiet(8);
        let id = projector.add_glyph_matrix_at(IVec2::new(1, 1)).unwrap();
        projector.glyph_mut(id).unwrap().core_mut().lifetime = 12;

        for _ in 0..12 {
            projector.update();
        }
        assert!(projector.glyph(id).is_none());
        assert_eq!(projector.pooled_glyph_count(), 0);
        assert!(projector.grid().is_vacant(IVec2::new(1, 1)));
    }

    #[test]
    fn test_matrix_size_stays_in_range() {
        let mut projector = quiet(8);
        let id = projector.add_glyph_matrix_at(IVec2::new(4, 4)).unwrap();
        projector.glyph_mut(id).unwrap().core_mut().lifetime = 10_000;

        for _ in 0..2_000 {
            projector.update();
            let matrix = projector.glyph(id).and_then(|glyph| glyph.as_matrix()).unwrap();
            assert!(matrix.current_size().cmpge(IVec2::ONE).all());
            assert!(matrix.current_size().cmple(matrix.max_size()).all());
        }
    }

    #[test]
    fn test_cursor_eventually_leaves_room() {
        let mut projector = quiet(20);
        projector.add_cursor_at(IVec2::ZERO);

        let mut ticks = 0;
        while !projector.cursors().is_empty() {
            for cursor in projector.cursors() {
                let target = cursor.grid_target();
                assert!(target.cmpge(IVec2::ZERO).all() && target.cmplt(IVec2::splat(20)).all());
            }
            projector.update();
            ticks += 1;
            assert!(ticks < 1_000_000, "cursor never left the room");
        }
    }
}

#[cfg(test)]
mod simulation_tests {
    use crate::projector::{Projector, ProjectorSettings};
    use bevy::math::{IVec2, Vec2};

    #[test]
    fn test_long_run_keeps_occupancy_consistent() {
        let settings = ProjectorSettings::default().with_grid_size(IVec2::new(40, 24));
        let mut projector = Projector::from_seed(settings, 2024);

        for _ in 0..2_000 {
            projector.update();
            if let Err(problem) = projector.check_invariants() {
                panic!("tick {}: {}", projector.tick_count(), problem);
            }
        }

        let stats = projector.stats();
        assert_eq!(stats.occupied_cells, stats.live_glyphs);
        assert!(stats.cursors <= projector.settings().max_cursors);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let run = |seed| {
            let mut projector = Projector::from_seed(ProjectorSettings::default(), seed);
            for _ in 0..300 {
                projector.update();
            }
            let positions: Vec<Vec2> = projector
                .render(0.25, Vec2::ZERO)
                .iter()
                .map(|primitive| primitive.position)
                .collect();
            (projector.stats(), positions)
        };

        assert_eq!(run(77), run(77));
    }
}
