//! Tunables for a projector instance

use bevy::math::{IVec2, Vec2};

use super::draw::CELL_PX;

pub const DEFAULT_GRID_SIZE: IVec2 = IVec2::new(80, 48);
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1366.0, 768.0);

/// Largest grid accepted on either axis
pub const MAX_GRID_EXTENT: i32 = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectorSettings {
    pub grid_size: IVec2,
    /// Bounds a cursor target may roam in before the cursor is dropped
    pub room_size: IVec2,
    /// Screen position of grid cell (0, 0)
    pub origin: Vec2,
    pub viewport_size: Vec2,
    /// Intensity knob in [0, 1]
    pub effect_amount: f32,
    /// Population target for the early procreation boost and seeding
    pub ideal_glyph_count: usize,
    pub visible: bool,
    /// Per-tick chance of seeding a single glyph while under target
    pub seed_chance: f64,
    /// Per-tick chance of placing a glyph matrix
    pub matrix_chance: f64,
    /// Per-tick chance of spawning a cursor
    pub cursor_chance: f64,
    pub max_cursors: usize,
    /// Per-tick chance of re-rolling the projection jitter
    pub jitter_chance: f64,
    /// Jitter amplitude in pixels at full effect amount
    pub jitter_amplitude: f32,
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        let grid_size = DEFAULT_GRID_SIZE;
        Self {
            grid_size,
            room_size: grid_size,
            origin: centered_origin(grid_size, DEFAULT_VIEWPORT),
            viewport_size: DEFAULT_VIEWPORT,
            effect_amount: 0.6,
            ideal_glyph_count: 300,
            visible: true,
            seed_chance: 0.2,
            matrix_chance: 0.02,
            cursor_chance: 0.01,
            max_cursors: 3,
            jitter_chance: 0.05,
            jitter_amplitude: 3.0,
        }
    }
}

impl ProjectorSettings {
    /// Resize the grid and keep the room and origin consistent with it
    pub fn with_grid_size(mut self, grid_size: IVec2) -> Self {
        self.grid_size = grid_size;
        self.room_size = grid_size;
        self.origin = centered_origin(grid_size, self.viewport_size);
        self
    }

    /// Settings with every ambient spawner and the jitter switched off,
    /// for hosts that script placements themselves
    pub fn quiet(self) -> Self {
        Self {
            seed_chance: 0.0,
            matrix_chance: 0.0,
            cursor_chance: 0.0,
            jitter_chance: 0.0,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_grid_size(self.grid_size)?;
        if self.room_size.cmplt(IVec2::ONE).any() {
            return Err(format!("Room size must be positive, got {}", self.room_size));
        }
        if !(0.0..=1.0).contains(&self.effect_amount) {
            return Err(format!(
                "Effect amount must be between 0 and 1, got {}",
                self.effect_amount
            ));
        }
        let chances = [
            ("seed_chance", self.seed_chance),
            ("matrix_chance", self.matrix_chance),
            ("cursor_chance", self.cursor_chance),
            ("jitter_chance", self.jitter_chance),
        ];
        for (name, chance) in chances {
            if !(0.0..=1.0).contains(&chance) {
                return Err(format!("{name} must be a probability, got {chance}"));
            }
        }
        if self.jitter_amplitude < 0.0 {
            return Err(format!(
                "Jitter amplitude cannot be negative, got {}",
                self.jitter_amplitude
            ));
        }
        Ok(())
    }

    /// Pull every field back into the range the simulation can run with
    pub fn sanitized(self) -> Self {
        Self {
            grid_size: self.grid_size.clamp(IVec2::ONE, IVec2::splat(MAX_GRID_EXTENT)),
            room_size: self.room_size.max(IVec2::ONE),
            effect_amount: finite_or_zero(self.effect_amount).clamp(0.0, 1.0),
            seed_chance: probability(self.seed_chance),
            matrix_chance: probability(self.matrix_chance),
            cursor_chance: probability(self.cursor_chance),
            jitter_chance: probability(self.jitter_chance),
            jitter_amplitude: finite_or_zero(self.jitter_amplitude).max(0.0),
            ..self
        }
    }
}

fn probability(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn validate_grid_size(size: IVec2) -> Result<(), String> {
    if size.cmplt(IVec2::ONE).any() || size.cmpgt(IVec2::splat(MAX_GRID_EXTENT)).any() {
        return Err(format!(
            "Grid size must be between 1x1 and {MAX_GRID_EXTENT}x{MAX_GRID_EXTENT}, got {}x{}",
            size.x, size.y
        ));
    }
    Ok(())
}

/// Origin that centres a grid of `grid_size` cells in `viewport`
pub fn centered_origin(grid_size: IVec2, viewport: Vec2) -> Vec2 {
    ((viewport - grid_size.as_vec2() * CELL_PX) * 0.5).max(Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ProjectorSettings::default().validate().is_ok());
        assert!(ProjectorSettings::default().quiet().validate().is_ok());
    }

    #[test]
    fn test_default_grid_is_centered() {
        let settings = ProjectorSettings::default();
        assert_eq!(settings.origin, Vec2::new(83.0, 24.0));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut settings = ProjectorSettings::default();
        settings.effect_amount = 1.5;
        assert!(settings.validate().is_err());

        let settings = ProjectorSettings::default().with_grid_size(IVec2::new(0, 10));
        assert!(settings.validate().is_err());

        let mut settings = ProjectorSettings::default();
        settings.cursor_chance = -0.1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_sanitized_settings_validate() {
        let settings = ProjectorSettings {
            room_size: IVec2::ZERO,
            effect_amount: f32::NAN,
            cursor_chance: 1.5,
            seed_chance: f64::NAN,
            jitter_chance: -2.0,
            jitter_amplitude: f32::INFINITY,
            ..ProjectorSettings::default()
        }
        .sanitized();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.room_size, IVec2::ONE);
        assert_eq!(settings.cursor_chance, 1.0);
        assert_eq!(settings.seed_chance, 0.0);
        assert_eq!(settings.jitter_chance, 0.0);
        assert_eq!(settings.jitter_amplitude, 0.0);
    }

    #[test]
    fn test_sanitized_keeps_valid_settings() {
        let settings = ProjectorSettings::default();
        assert_eq!(settings.clone().sanitized(), settings);
    }
}
