//! Maze tunables

use anyhow::ensure;

/// Everything that shapes a maze and its placement in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    /// Logical grid width in cells
    pub width: usize,
    /// Logical grid height in cells
    pub height: usize,
    /// Corridor width setting, `1..=10` recommended
    ///
    /// Converted to the visual grid scale with [Self::grid_scale].
    pub path_width: f64,
    /// World size of one visual grid cell
    pub unit_length: f64,
    /// Probability of opening each cross-connection candidate
    pub cross_connection_chance: f64,
    /// Probability of an interior wall segment being short
    pub short_wall_chance: f64,
    /// Height of a full wall segment
    pub wall_height: f64,
    /// Height of a short wall segment
    pub short_wall_height: f64,
    /// Elevation given to navigation waypoints
    pub waypoint_elevation: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
            path_width: 5.0,
            unit_length: 10.0,
            cross_connection_chance: 0.25,
            short_wall_chance: 0.08,
            wall_height: 30.0,
            short_wall_height: 8.0,
            waypoint_elevation: 1.35,
        }
    }
}

impl MazeConfig {
    /// Widest accepted corridor setting
    pub const MAX_PATH_WIDTH: f64 = 100.0;

    /// Number of visual cells along one side of a logical cell.
    ///
    /// Always odd and at least 3: `max(3, floor(path_width) * 2 + 1)`.
    pub fn grid_scale(&self) -> usize {
        let setting = self.path_width.floor().max(0.0) as usize;
        setting.saturating_mul(2).saturating_add(1).max(3)
    }

    /// Check for setup-time misuse.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "Maze dimensions must be positive, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.path_width.is_finite()
                && self.path_width > 0.0
                && self.path_width <= Self::MAX_PATH_WIDTH,
            "Path width must be within (0, {}], got {}",
            Self::MAX_PATH_WIDTH,
            self.path_width
        );
        let scale = self.grid_scale();
        ensure!(
            self.width.checked_mul(scale).is_some() && self.height.checked_mul(scale).is_some(),
            "Visual grid of {}x{} cells at scale {} is too large",
            self.width,
            self.height,
            scale
        );
        ensure!(
            self.unit_length.is_finite() && self.unit_length > 0.0,
            "Unit length must be a positive number, got {}",
            self.unit_length
        );
        for (name, p) in [
            ("Cross connection chance", self.cross_connection_chance),
            ("Short wall chance", self.short_wall_chance),
        ] {
            ensure!(
                (0.0..=1.0).contains(&p),
                "{} must be within [0, 1], got {}",
                name,
                p
            );
        }
        Ok(())
    }
}
