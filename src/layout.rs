//! Placement of the player and of wall geometry

use rand::Rng;

use crate::config::MazeConfig;
use crate::coords::{GridMapper, WorldPoint};
use crate::model::{Direction, MazeModel, Point};

/// Orientation of a corridor
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Straight run of consecutive path cells
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Corridor {
    pub start: Point,
    pub end: Point,
    /// Number of cells, ends included
    pub length: usize,
    pub orientation: Orientation,
}

/// Initial player pose
#[derive(PartialEq, Clone, Debug)]
pub struct PlayerStart {
    pub position: WorldPoint,
    pub look_at: WorldPoint,
}

/// One visual cell of wall geometry
#[derive(PartialEq, Clone, Debug)]
pub struct WallSegment {
    /// Visual grid coordinates `(x, y)`
    pub visual: (usize, usize),
    /// Centre of the segment; `y` is half its height
    pub position: WorldPoint,
    pub height: f64,
}

impl WallSegment {
    pub fn is_short(&self, config: &MazeConfig) -> bool {
        self.height < config.wall_height
    }
}

/// Longest straight run of path cells.
///
/// Rows are scanned first, then columns; a later run replaces an earlier one
/// only when strictly longer.
pub fn find_longest_corridor(maze: &MazeModel) -> Option<Corridor> {
    let mut longest: Option<Corridor> = None;
    let mut consider = |start: Point, end: Point, length: usize, orientation| {
        if longest.as_ref().map_or(true, |c| length > c.length) {
            longest = Some(Corridor {
                start,
                end,
                length,
                orientation,
            });
        }
    };

    for y in 0..maze.height() {
        let mut x = 0;
        while x < maze.width() {
            if !maze.is_path(Point::new(x, y)) {
                x += 1;
                continue;
            }
            let run_start = x;
            while x < maze.width() && maze.is_path(Point::new(x, y)) {
                x += 1;
            }
            consider(
                Point::new(run_start, y),
                Point::new(x - 1, y),
                x - run_start,
                Orientation::Horizontal,
            );
        }
    }
    for x in 0..maze.width() {
        let mut y = 0;
        while y < maze.height() {
            if !maze.is_path(Point::new(x, y)) {
                y += 1;
                continue;
            }
            let run_start = y;
            while y < maze.height() && maze.is_path(Point::new(x, y)) {
                y += 1;
            }
            consider(
                Point::new(x, run_start),
                Point::new(x, y - 1),
                y - run_start,
                Orientation::Vertical,
            );
        }
    }
    longest
}

/// Stand at a random end of the longest corridor, looking down its length.
///
/// Without a corridor of at least two cells, start at `(1, 1)` looking
/// towards `(1, 2)`.
pub fn player_start<R: Rng>(
    maze: &MazeModel,
    mapper: &GridMapper,
    eye_height: f64,
    random: &mut R,
) -> PlayerStart {
    let (from, towards) = match find_longest_corridor(maze) {
        Some(corridor) if corridor.length > 1 => {
            log::debug!(
                "Longest corridor: length {}, ({}, {}) to ({}, {})",
                corridor.length,
                corridor.start.x,
                corridor.start.y,
                corridor.end.x,
                corridor.end.y
            );
            if random.gen_bool(0.5) {
                (corridor.start, corridor.end)
            } else {
                (corridor.end, corridor.start)
            }
        }
        _ => {
            log::warn!("No suitable corridor found, using default start (1, 1)");
            (Point::new(1, 1), Point::new(1, 2))
        }
    };
    PlayerStart {
        position: mapper.grid_to_world(from).with_y(eye_height),
        look_at: mapper.grid_to_world(towards).with_y(eye_height),
    }
}

/// Wall geometry for every solid visual cell.
///
/// Visual cells of a solid logical cell are solid. Inside a path cell, the
/// border row or column facing a wall is solid, and so is a corner unless
/// both of its sides are open and the diagonal cell is a path cell as well.
/// Interior segments are shortened with `config.short_wall_chance`; the
/// outer ring always stays full height.
pub fn wall_segments<R: Rng>(
    maze: &MazeModel,
    mapper: &GridMapper,
    config: &MazeConfig,
    random: &mut R,
) -> Vec<WallSegment> {
    let (visual_width, visual_height) = (mapper.visual_width(), mapper.visual_height());
    let short_chance = if (0.0..=1.0).contains(&config.short_wall_chance) {
        config.short_wall_chance
    } else {
        0.0
    };
    let mut segments = vec![];
    for visual_y in 0..visual_height {
        for visual_x in 0..visual_width {
            if !is_solid(maze, mapper, visual_x, visual_y) {
                continue;
            }
            let outer = visual_x == 0
                || visual_y == 0
                || visual_x + 1 == visual_width
                || visual_y + 1 == visual_height;
            let height = if !outer && random.gen_bool(short_chance) {
                config.short_wall_height
            } else {
                config.wall_height
            };
            segments.push(WallSegment {
                visual: (visual_x, visual_y),
                position: mapper
                    .visual_grid_to_world(visual_x, visual_y)
                    .with_y(height / 2.0),
                height,
            });
        }
    }
    log::debug!("Placed {} wall segments", segments.len());
    segments
}

fn is_solid(maze: &MazeModel, mapper: &GridMapper, visual_x: usize, visual_y: usize) -> bool {
    let cell = mapper.visual_to_grid(visual_x, visual_y);
    if !maze.is_path(cell) {
        return true;
    }
    let last = mapper.scale() - 1;
    let local_x = visual_x % mapper.scale();
    let local_y = visual_y % mapper.scale();

    let horizontal = match local_x {
        0 => Some(Direction::Left),
        x if x == last => Some(Direction::Right),
        _ => None,
    };
    let vertical = match local_y {
        0 => Some(Direction::Up),
        y if y == last => Some(Direction::Down),
        _ => None,
    };
    match (horizontal, vertical) {
        (None, None) => false,
        (Some(dir), None) | (None, Some(dir)) => !maze.is_open(cell, dir),
        (Some(h), Some(v)) => {
            let diagonal = maze.step(cell, h).and_then(|n| maze.step(n, v));
            !(maze.is_open(cell, h)
                && maze.is_open(cell, v)
                && diagonal.is_some_and(|d| maze.is_path(d)))
        }
    }
}
