//! Grid pathfinding for agents
//!
//! Movement is restricted to the four axis directions and blocked by the
//! wall flags carved during generation. A failed search is an ordinary
//! outcome: callers receive `None` and are expected to pick another goal.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::coords::{GridMapper, WorldPoint};
use crate::model::{Direction, MazeModel, Point};

/// Entry of the A* open set.
///
/// Ordered by lowest f-score first, then by insertion order, so that entries
/// with equal f-scores leave the heap first-in first-out.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
struct OpenNode {
    f_score: usize,
    sequence: usize,
    index: usize,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse for lowest-first
        Reverse((self.f_score, self.sequence)).cmp(&Reverse((other.f_score, other.sequence)))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* path queries and random goal selection over a [MazeModel]
pub struct PathFinder {
    expansion_factor: usize,
    random: StdRng,
}

impl PathFinder {
    /// Default cap on expanded nodes, as a multiple of the grid cell count
    pub const DEFAULT_EXPANSION_FACTOR: usize = 4;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            expansion_factor: Self::DEFAULT_EXPANSION_FACTOR,
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Abandon searches after expanding `factor * width * height` nodes
    pub fn with_expansion_factor(mut self, factor: usize) -> Self {
        self.expansion_factor = factor;
        self
    }

    /// Shortest route from `start` to `goal`, both ends included.
    ///
    /// Returns `None` if either end is not a path cell, no route exists, or
    /// the search outgrows its expansion budget.
    ///
    /// ## Arguments
    /// - `maze`: Carved maze to search.
    /// - `start`: First cell of the route.
    /// - `goal`: Last cell of the route.
    pub fn find_path(&self, maze: &MazeModel, start: Point, goal: Point) -> Option<Vec<Point>> {
        if !maze.is_path(start) || !maze.is_path(goal) {
            log::warn!(
                "A* pathfinding: invalid start ({}, {}) or goal ({}, {}) cell",
                start.x,
                start.y,
                goal.x,
                goal.y
            );
            return None;
        }
        let start_idx = maze.index(start)?;
        let goal_idx = maze.index(goal)?;

        let max_expanded = self.expansion_factor.saturating_mul(maze.len());
        let mut g_score = vec![usize::MAX; maze.len()];
        let mut came_from: Vec<Option<usize>> = vec![None; maze.len()];
        let mut closed = vec![false; maze.len()];

        let mut sequence = 0;
        let mut open = BinaryHeap::new();
        g_score[start_idx] = 0;
        open.push(OpenNode {
            f_score: start.manhattan(&goal),
            sequence,
            index: start_idx,
        });

        let mut expanded = 0;
        while let Some(OpenNode { index, .. }) = open.pop() {
            if index == goal_idx {
                return Self::reconstruct_path(maze, &came_from, start_idx, goal_idx);
            }
            if closed[index] {
                continue;
            }
            if expanded >= max_expanded {
                log::warn!(
                    "A* pathfinding exceeded the limit of {} expanded cells",
                    max_expanded
                );
                return None;
            }
            closed[index] = true;
            expanded += 1;

            let current = maze.point_at(index);
            let tentative_g = g_score[index] + 1;
            for dir in Direction::ALL {
                if !maze.is_open(current, dir) {
                    continue;
                }
                let Some(neighbor_idx) = maze.step(current, dir).and_then(|n| maze.index(n))
                else {
                    continue;
                };
                if tentative_g < g_score[neighbor_idx] {
                    g_score[neighbor_idx] = tentative_g;
                    came_from[neighbor_idx] = Some(index);
                    sequence += 1;
                    open.push(OpenNode {
                        f_score: tentative_g + maze.point_at(neighbor_idx).manhattan(&goal),
                        sequence,
                        index: neighbor_idx,
                    });
                }
            }
        }

        log::warn!(
            "A* pathfinding failed from ({}, {}) to ({}, {})",
            start.x,
            start.y,
            goal.x,
            goal.y
        );
        None
    }

    /// Walk the back-pointers from `goal` to `start`.
    ///
    /// More than `width * height` steps means the back-pointers loop; the
    /// route is then discarded.
    fn reconstruct_path(
        maze: &MazeModel,
        came_from: &[Option<usize>],
        start_idx: usize,
        goal_idx: usize,
    ) -> Option<Vec<Point>> {
        let mut path = vec![maze.point_at(goal_idx)];
        let mut idx = goal_idx;
        while idx != start_idx {
            if path.len() > maze.len() {
                log::warn!("A* path reconstruction exceeded {} steps", maze.len());
                return None;
            }
            idx = came_from[idx]?;
            path.push(maze.point_at(idx));
        }
        path.reverse();
        Some(path)
    }

    /// World waypoints for a route, at ground-level agent `elevation`.
    ///
    /// An empty route yields no waypoints.
    pub fn path_to_world_waypoints(
        mapper: &GridMapper,
        path: &[Point],
        elevation: f64,
    ) -> Vec<WorldPoint> {
        path.iter()
            .map(|&p| mapper.grid_to_world(p).with_y(elevation))
            .collect()
    }

    /// Random path cell, to be used as an agent goal.
    ///
    /// Samples up to `width * height` random cells, then falls back to the
    /// first path cell in row-major order. Returns `None` only when the maze
    /// has no path cells.
    pub fn find_random_reachable_cell(&mut self, maze: &MazeModel) -> Option<Point> {
        self.random_cell_within(maze, maze.len())
    }

    fn random_cell_within(&mut self, maze: &MazeModel, attempts: usize) -> Option<Point> {
        let Some(first) = maze.path_cells().next() else {
            log::warn!("No path cells in the maze; has it been generated?");
            return None;
        };
        for _ in 0..attempts {
            let p = Point::new(
                self.random.gen_range(0..maze.width()),
                self.random.gen_range(0..maze.height()),
            );
            if maze.is_path(p) {
                return Some(p);
            }
        }
        log::debug!("Random sampling found no path cell, using first in row order");
        Some(first)
    }
}
