//! Procedural maze generation and agent navigation for a first-person maze
//! shooter
//!
//! A maze is a rectangular grid of logical cells. Generation carves a
//! perfect maze with a randomized depth-first search, optionally opens extra
//! loops, and agents find their way around with A*. Cells map onto a finer
//! visual grid for wall geometry and onto a continuous world plane centred
//! on the origin.
//!
//! # Examples
//! ## Route across the default maze
//! ```
//! use matrix_maze::{Maze, MazeConfig, Point};
//!
//! let maze = Maze::build(MazeConfig::default(), Some(7)).unwrap();
//! let route = maze.route(Point::new(1, 1), Point::new(11, 11)).unwrap();
//! assert_eq!(route.cells.first(), Some(&Point::new(1, 1)));
//! assert_eq!(route.waypoints.len(), route.cells.len());
//! route.print_report();
//! ```
//!
//! ## Step by step
//! ```
//! use matrix_maze::maze_generator::MazeGenerator;
//! use matrix_maze::pathfinding::PathFinder;
//! use matrix_maze::{GridMapper, Point};
//!
//! let mut gen = MazeGenerator::new(Some(1));
//! let mut maze = gen.init_grid(9, 9).unwrap();
//! gen.generate(&mut maze, Point::new(1, 1)).unwrap();
//! gen.add_cross_connections(&mut maze, 0.25).unwrap();
//!
//! let mut finder = PathFinder::new(Some(1));
//! let goal = finder.find_random_reachable_cell(&maze).unwrap();
//! let path = finder.find_path(&maze, Point::new(1, 1), goal).unwrap();
//!
//! let mapper = GridMapper::new(9, 9, 3, 10.0);
//! let waypoints = PathFinder::path_to_world_waypoints(&mapper, &path, 1.35);
//! let last = waypoints.last().unwrap();
//! assert_eq!(mapper.world_to_grid(last.x, last.z), goal);
//! ```

pub mod config;
pub mod coords;
pub mod display;
pub mod graph;
pub mod layout;
pub mod maze_generator;
pub mod model;
pub mod pathfinding;

use anyhow::Context;
use rand::Rng;

pub use crate::config::MazeConfig;
pub use crate::coords::{GridMapper, WorldPoint};
pub use crate::model::{Cell, Direction, MazeModel, Point, Walls};

use crate::layout::{PlayerStart, WallSegment};
use crate::maze_generator::MazeGenerator;
use crate::pathfinding::PathFinder;

/// Generated maze together with its world placement
pub struct Maze {
    config: MazeConfig,
    model: MazeModel,
    mapper: GridMapper,
    finder: PathFinder,
    /// Number of loops opened after generation
    cross_connections: usize,
}

/// Route between two cells
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Cells from start to goal, both included
    pub cells: Vec<Point>,
    /// World positions of the cells, at waypoint elevation
    pub waypoints: Vec<WorldPoint>,
}

impl Maze {
    /// Build a maze: allocate the grid, carve it, then open cross connections.
    ///
    /// Carving starts at `(1, 1)`, or at `(0, 0)` on grids too small for it.
    ///
    /// - `config`: Maze tunables; rejected if invalid.
    /// - `seed`: Random seed, or `None` for a fresh maze on every call.
    pub fn build(config: MazeConfig, seed: Option<u64>) -> anyhow::Result<Self> {
        config.validate()?;
        log::debug!(
            "Path width setting {}, grid scale {}",
            config.path_width,
            config.grid_scale()
        );

        let mut gen = MazeGenerator::new(seed);
        let mut model = gen.init_grid(config.width, config.height)?;
        let start = [Point::new(1, 1), Point::new(0, 0)]
            .into_iter()
            .find(|&p| model.contains(p))
            .context("Grid has no cell to start carving from")?;
        gen.generate(&mut model, start)?;
        let cross_connections = gen.add_cross_connections(&mut model, config.cross_connection_chance)?;

        Ok(Self {
            mapper: GridMapper::from_config(&config),
            finder: PathFinder::new(seed.map(|s| s.wrapping_add(1))),
            config,
            model,
            cross_connections,
        })
    }

    /// Replace the maze with a freshly generated one of the same configuration.
    ///
    /// The old grid is dropped as a whole, never edited in place.
    pub fn regenerate(&mut self, seed: Option<u64>) -> anyhow::Result<()> {
        *self = Self::build(self.config.clone(), seed)?;
        Ok(())
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn model(&self) -> &MazeModel {
        &self.model
    }

    pub fn mapper(&self) -> &GridMapper {
        &self.mapper
    }

    pub fn cross_connections(&self) -> usize {
        self.cross_connections
    }

    /// Shortest route from `start` to `goal`, with world waypoints
    pub fn route(&self, start: Point, goal: Point) -> Option<Route> {
        let cells = self.finder.find_path(&self.model, start, goal)?;
        let waypoints = PathFinder::path_to_world_waypoints(
            &self.mapper,
            &cells,
            self.config.waypoint_elevation,
        );
        Some(Route { cells, waypoints })
    }

    /// Random path cell, e.g. a new goal for an agent
    pub fn random_cell(&mut self) -> Option<Point> {
        self.finder.find_random_reachable_cell(&self.model)
    }

    /// Player pose at the end of the longest corridor, at half wall height
    pub fn player_start<R: Rng>(&self, random: &mut R) -> PlayerStart {
        layout::player_start(
            &self.model,
            &self.mapper,
            self.config.wall_height * 0.5,
            random,
        )
    }

    /// Wall geometry for the whole maze
    pub fn wall_segments<R: Rng>(&self, random: &mut R) -> Vec<WallSegment> {
        layout::wall_segments(&self.model, &self.mapper, &self.config, random)
    }
}

impl Route {
    /// Number of moves, one less than the number of cells
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Print report
    pub fn print_report(&self) {
        match self.steps() {
            0 => println!("Already at the goal."),
            n => println!("The shortest route is {} steps.", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{graph, Maze, MazeConfig, Point};

    #[test]
    fn build_default_maze() {
        let maze = Maze::build(MazeConfig::default(), Some(0)).unwrap();
        assert_eq!(maze.model().width(), 12);
        assert!(maze.model().is_path(Point::new(1, 1)));
        assert_eq!(graph::connected_components(maze.model()), 1);
        assert_eq!(maze.mapper().scale(), 11);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = Maze::build(MazeConfig::default(), Some(5)).unwrap();
        let b = Maze::build(MazeConfig::default(), Some(5)).unwrap();
        assert!(a.model().cells().eq(b.model().cells()));
    }

    #[test]
    fn tiny_maze_starts_in_corner() {
        let config = MazeConfig {
            width: 1,
            height: 1,
            ..MazeConfig::default()
        };
        let mut maze = Maze::build(config, Some(0)).unwrap();
        assert!(maze.model().is_path(Point::new(0, 0)));
        assert_eq!(maze.random_cell(), Some(Point::new(0, 0)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = MazeConfig {
            height: 0,
            ..MazeConfig::default()
        };
        assert!(Maze::build(config, None).is_err());

        let huge_path = MazeConfig {
            path_width: 1e20,
            ..MazeConfig::default()
        };
        assert!(Maze::build(huge_path, Some(0)).is_err());
    }

    #[test]
    fn route_carries_world_waypoints() {
        let maze = Maze::build(MazeConfig::default(), Some(3)).unwrap();
        let route = maze.route(Point::new(1, 1), Point::new(1, 1)).unwrap();
        assert_eq!(route.steps(), 0);
        assert_eq!(route.waypoints.len(), 1);
        assert_eq!(route.waypoints[0].y, 1.35);

        let far = maze.route(Point::new(1, 1), Point::new(11, 1)).unwrap();
        assert!(far.steps() >= 10);
        for (cell, waypoint) in far.cells.iter().zip(&far.waypoints) {
            assert_eq!(maze.mapper().world_to_grid(waypoint.x, waypoint.z), *cell);
        }
    }

    #[test]
    fn regenerate_keeps_configuration() {
        let config = MazeConfig {
            width: 9,
            height: 7,
            ..MazeConfig::default()
        };
        let mut maze = Maze::build(config.clone(), Some(1)).unwrap();
        maze.regenerate(Some(2)).unwrap();
        assert_eq!(maze.config(), &config);
        assert_eq!(maze.model().height(), 7);
        assert!(graph::is_perfect(maze.model()));
    }

    #[test]
    fn player_starts_on_a_path_cell() {
        let maze = Maze::build(MazeConfig::default(), Some(4)).unwrap();
        let start = maze.player_start(&mut StdRng::seed_from_u64(0));
        let cell = maze.mapper().world_to_grid(start.position.x, start.position.z);
        assert!(maze.model().is_path(cell));
        assert_eq!(start.position.y, 15.0);
        assert!(!maze.wall_segments(&mut StdRng::seed_from_u64(0)).is_empty());
    }
}
