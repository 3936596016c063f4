//! Maze generation

use anyhow::{bail, ensure};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::model::{Direction, MazeModel, Point};

/// Randomized depth-first maze generator.
///
/// Carving moves two cells at a time, so the cell in between becomes the
/// passage and the cells around it stay solid.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Distance between two logical cells connected by a passage
    const CARVE_STEP: usize = 2;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Allocate a fully walled grid, ready for [Self::generate]
    pub fn init_grid(&self, width: usize, height: usize) -> anyhow::Result<MazeModel> {
        let maze = MazeModel::new(width, height)?;
        log::debug!("Initialized {}x{} logical grid", width, height);
        Ok(maze)
    }

    /// Carve a perfect maze reachable from `start`.
    ///
    /// Iterative depth-first search with an explicit stack: look at the top
    /// cell, carve towards a random unvisited neighbour two steps away, and
    /// backtrack once no such neighbour remains.
    pub fn generate(&mut self, maze: &mut MazeModel, start: Point) -> anyhow::Result<()> {
        ensure!(
            maze.contains(start),
            "Start cell ({}, {}) is outside the {}x{} grid",
            start.x,
            start.y,
            maze.width(),
            maze.height()
        );
        log::debug!("Starting maze generation from ({}, {})", start.x, start.y);
        if let Some(cell) = maze.cell_mut(start) {
            cell.visited = true;
            cell.carve();
        }

        let mut stack = vec![start];
        while let Some(&current) = stack.last() {
            let neighbors = Self::unvisited_neighbors(maze, current);
            let Some(&chosen) = neighbors.choose(&mut self.random) else {
                stack.pop();
                continue;
            };
            Self::remove_wall(maze, current, chosen)?;
            if let Some(cell) = maze.cell_mut(chosen) {
                cell.visited = true;
                cell.carve();
            }
            stack.push(chosen);
        }

        log::debug!(
            "Maze generation complete, {} path cells",
            maze.path_cell_count()
        );
        Ok(())
    }

    /// Unvisited cells two steps away from `p`, in north, south, west, east order.
    ///
    /// Probes that fall outside the grid are skipped.
    pub fn unvisited_neighbors(maze: &MazeModel, p: Point) -> Vec<Point> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| maze.step_by(p, dir, Self::CARVE_STEP))
            .filter(|&n| maze.cell(n).is_some_and(|c| !c.visited))
            .collect()
    }

    /// Open a passage between `a` and `b`, two cells apart on one axis.
    ///
    /// Clears the facing walls of `a` and `b`, and turns the cell in between
    /// into a path cell open along the movement axis.
    pub fn remove_wall(maze: &mut MazeModel, a: Point, b: Point) -> anyhow::Result<()> {
        let Some(dir) = Direction::ALL
            .into_iter()
            .find(|&dir| maze.step_by(a, dir, Self::CARVE_STEP) == Some(b))
        else {
            bail!(
                "Cells ({}, {}) and ({}, {}) are not two steps apart",
                a.x,
                a.y,
                b.x,
                b.y
            );
        };
        let Some(between) = maze.step(a, dir) else {
            bail!("No cell between ({}, {}) and ({}, {})", a.x, a.y, b.x, b.y);
        };

        if let Some(cell) = maze.cell_mut(a) {
            cell.walls.set(dir, false);
        }
        if let Some(cell) = maze.cell_mut(b) {
            cell.walls.set(dir.opposite(), false);
        }
        if let Some(cell) = maze.cell_mut(between) {
            cell.carve();
            cell.walls.set(dir, false);
            cell.walls.set(dir.opposite(), false);
        }
        Ok(())
    }

    /// Walls that would close a loop if removed.
    ///
    /// A candidate is the intact right or bottom wall of a path cell whose
    /// neighbour on that side is a path cell, and whose next cell beyond it
    /// is a path cell as well. Removing one never reaches new territory.
    pub fn cross_connection_candidates(maze: &MazeModel) -> Vec<(Point, Direction)> {
        let mut candidates = vec![];
        for cell in maze.cells().filter(|c| c.is_path) {
            let p = cell.point();
            for dir in [Direction::Right, Direction::Down] {
                if !cell.walls.has(dir) {
                    continue;
                }
                let beyond_is_path = |distance| {
                    maze.step_by(p, dir, distance)
                        .is_some_and(|n| maze.is_path(n))
                };
                if beyond_is_path(1) && beyond_is_path(2) {
                    candidates.push((p, dir));
                }
            }
        }
        candidates
    }

    /// Remove each cross-connection candidate with independent `probability`.
    ///
    /// Returns the number of walls removed.
    pub fn add_cross_connections(
        &mut self,
        maze: &mut MazeModel,
        probability: f64,
    ) -> anyhow::Result<usize> {
        ensure!(
            (0.0..=1.0).contains(&probability),
            "Cross connection probability must be within [0, 1], got {}",
            probability
        );
        log::debug!("Adding cross connections with chance {:.0}%", probability * 100.0);

        let mut added = 0;
        for (p, dir) in Self::cross_connection_candidates(maze) {
            if self.random.gen_bool(probability) && maze.open_passage(p, dir) {
                log::trace!("Cross connection at ({}, {}) {:?}", p.x, p.y, dir);
                added += 1;
            }
        }
        log::debug!("Added {} cross connections", added);
        Ok(added)
    }
}
