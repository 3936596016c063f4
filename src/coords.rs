//! Conversions between the logical grid, the visual sub-grid and world space
//!
//! The world is laid out on the X/Z plane and centred on the origin. Each
//! logical cell covers `scale x scale` visual cells, and each visual cell is
//! `unit_length` world units wide. Elevation (Y) is left to the caller.

use crate::config::MazeConfig;
use crate::model::Point;

/// Position in world space
#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same point at a different elevation
    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Squared distance on the ground plane
    pub fn distance_squared_xz(&self, other: &WorldPoint) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }
}

/// Stateless coordinate mapper for one maze size and scale
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct GridMapper {
    width: usize,
    height: usize,
    scale: usize,
    unit_length: f64,
}

impl GridMapper {
    /// - `width`, `height`: Logical grid size.
    /// - `scale`: Visual cells per logical cell side; raised to 1 if zero.
    /// - `unit_length`: World size of one visual cell.
    pub fn new(width: usize, height: usize, scale: usize, unit_length: f64) -> Self {
        Self {
            width,
            height,
            scale: scale.max(1),
            unit_length,
        }
    }

    pub fn from_config(config: &MazeConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            config.grid_scale(),
            config.unit_length,
        )
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn unit_length(&self) -> f64 {
        self.unit_length
    }

    /// Visual grid width, in visual cells
    pub fn visual_width(&self) -> usize {
        self.width * self.scale
    }

    /// Visual grid height, in visual cells
    pub fn visual_height(&self) -> usize {
        self.height * self.scale
    }

    /// World size of one logical cell
    pub fn cell_length(&self) -> f64 {
        self.scale as f64 * self.unit_length
    }

    /// Total maze size `(x, z)` in world units
    pub fn world_extent(&self) -> (f64, f64) {
        (
            self.visual_width() as f64 * self.unit_length,
            self.visual_height() as f64 * self.unit_length,
        )
    }

    /// Logical cell containing world position `(world_x, world_z)`.
    ///
    /// Positions outside the maze are clamped onto the nearest border cell.
    pub fn world_to_grid(&self, world_x: f64, world_z: f64) -> Point {
        let visual_x = world_x / self.unit_length + self.visual_width() as f64 / 2.0;
        let visual_z = world_z / self.unit_length + self.visual_height() as f64 / 2.0;
        let grid_x = (visual_x / self.scale as f64).floor();
        let grid_y = (visual_z / self.scale as f64).floor();

        let point = Point::new(
            clamp_index(grid_x, self.width),
            clamp_index(grid_y, self.height),
        );
        if point.x as f64 != grid_x || point.y as f64 != grid_y {
            log::trace!(
                "world_to_grid out of bounds: ({:.1}, {:.1}) clamped to ({}, {})",
                world_x,
                world_z,
                point.x,
                point.y
            );
        }
        point
    }

    /// World position of the centre of logical cell `p`, at `y = 0`.
    pub fn grid_to_world(&self, p: Point) -> WorldPoint {
        let cell = self.cell_length();
        WorldPoint::new(
            (p.x as f64 - self.width as f64 / 2.0 + 0.5) * cell,
            0.0,
            (p.y as f64 - self.height as f64 / 2.0 + 0.5) * cell,
        )
    }

    /// World position of the centre of visual cell `(visual_x, visual_y)`, at `y = 0`.
    pub fn visual_grid_to_world(&self, visual_x: usize, visual_y: usize) -> WorldPoint {
        WorldPoint::new(
            (visual_x as f64 - self.visual_width() as f64 / 2.0 + 0.5) * self.unit_length,
            0.0,
            (visual_y as f64 - self.visual_height() as f64 / 2.0 + 0.5) * self.unit_length,
        )
    }

    /// Logical cell that owns visual cell `(visual_x, visual_y)`
    pub fn visual_to_grid(&self, visual_x: usize, visual_y: usize) -> Point {
        Point::new(visual_x / self.scale, visual_y / self.scale)
    }
}

/// Clamp a floored float coordinate into `0..len`; NaN maps to 0.
fn clamp_index(value: f64, len: usize) -> usize {
    let max = len.saturating_sub(1);
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= max as f64 {
        max
    } else {
        value as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{GridMapper, WorldPoint};
    use crate::config::MazeConfig;
    use crate::model::Point;

    fn mapper() -> GridMapper {
        GridMapper::from_config(&MazeConfig::default())
    }

    #[test]
    fn grid_to_world_hits_cell_centres() {
        let m = mapper();
        // 12 cells * 11 visual cells * 10 units => 1320 units across
        assert_eq!(m.world_extent(), (1320.0, 1320.0));
        assert_eq!(m.grid_to_world(Point::new(0, 0)), WorldPoint::new(-605.0, 0.0, -605.0));
        assert_eq!(m.grid_to_world(Point::new(11, 11)), WorldPoint::new(605.0, 0.0, 605.0));
        assert_eq!(m.grid_to_world(Point::new(6, 5)), WorldPoint::new(55.0, 0.0, -55.0));
    }

    #[test]
    fn round_trip_through_world_space() {
        for (width, height, scale, unit) in [(12, 12, 11, 10.0), (5, 3, 3, 1.0), (7, 9, 21, 0.25)] {
            let m = GridMapper::new(width, height, scale, unit);
            for y in 0..height {
                for x in 0..width {
                    let p = Point::new(x, y);
                    let w = m.grid_to_world(p);
                    assert_eq!(m.world_to_grid(w.x, w.z), p);
                }
            }
        }
    }

    #[test]
    fn far_away_positions_are_clamped() {
        let m = GridMapper::new(4, 3, 3, 10.0);
        assert_eq!(m.world_to_grid(-1_000_000.0, -1_000_000.0), Point::new(0, 0));
        assert_eq!(m.world_to_grid(1_000_000.0, 1_000_000.0), Point::new(3, 2));
        assert_eq!(m.world_to_grid(1_000_000.0, -1_000_000.0), Point::new(3, 0));
        assert_eq!(m.world_to_grid(f64::NAN, f64::INFINITY), Point::new(0, 2));
    }

    #[test]
    fn cell_edges_belong_to_the_next_cell() {
        let m = GridMapper::new(2, 2, 3, 10.0);
        // The maze spans -30..30 on both axes; x = 0 is the seam between columns
        assert_eq!(m.world_to_grid(0.0, -0.001), Point::new(1, 0));
        assert_eq!(m.world_to_grid(-0.001, 0.0), Point::new(0, 1));
    }

    #[test]
    fn zero_scale_is_raised_to_one() {
        let m = GridMapper::new(3, 2, 0, 10.0);
        assert_eq!(m.scale(), 1);
        assert_eq!(m.visual_width(), 3);
        assert_eq!(m.visual_to_grid(2, 1), Point::new(2, 1));
    }

    #[test]
    fn visual_cells_subdivide_logical_cells() {
        let m = GridMapper::new(2, 2, 3, 10.0);
        assert_eq!(m.visual_grid_to_world(0, 0), WorldPoint::new(-25.0, 0.0, -25.0));
        // Middle visual cell of a logical cell shares its centre
        assert_eq!(m.visual_grid_to_world(4, 1), m.grid_to_world(Point::new(1, 0)));
        assert_eq!(m.visual_to_grid(4, 1), Point::new(1, 0));
    }
}
