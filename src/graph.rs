//! Connectivity view of a carved maze
//!
//! Path cells become nodes and every open passage between two path cells
//! becomes an undirected edge.

use std::collections::HashMap;

use petgraph::algo::{connected_components as count_components, dijkstra};
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

use crate::model::{Direction, MazeModel, Point};

/// Graph of path cells; node weights are the cell coordinates
pub struct MazeGraph {
    pub graph: Graph<Point, (), Undirected>,
    pub nodes: HashMap<Point, NodeIndex>,
}

/// Build the passage graph of `maze`.
///
/// Only right and down passages are inspected, because the graph is
/// undirected.
pub fn to_graph(maze: &MazeModel) -> MazeGraph {
    let mut graph = Graph::new_undirected();
    let nodes: HashMap<Point, NodeIndex> = maze
        .path_cells()
        .map(|p| (p, graph.add_node(p)))
        .collect();

    for (&p, &node_a) in nodes.iter() {
        for dir in [Direction::Right, Direction::Down] {
            if !maze.is_open(p, dir) {
                continue;
            }
            if let Some(node_b) = maze.step(p, dir).and_then(|n| nodes.get(&n)) {
                graph.add_edge(node_a, *node_b, ());
            }
        }
    }
    MazeGraph { graph, nodes }
}

/// Number of separate regions of path cells
pub fn connected_components(maze: &MazeModel) -> usize {
    count_components(&to_graph(maze).graph)
}

/// Whether the path cells form a tree: connected, without loops.
///
/// A grid without any path cells is not a maze, perfect or otherwise.
pub fn is_perfect(maze: &MazeModel) -> bool {
    let MazeGraph { graph, .. } = to_graph(maze);
    graph.node_count() > 0
        && count_components(&graph) == 1
        && graph.edge_count() == graph.node_count() - 1
}

/// Number of steps on the shortest route between two path cells.
///
/// Breadth-first distance over open passages; `None` when either cell is not
/// a path cell or no route exists.
pub fn shortest_distance(maze: &MazeModel, from: Point, to: Point) -> Option<usize> {
    let MazeGraph { graph, nodes } = to_graph(maze);
    let (&start, &goal) = (nodes.get(&from)?, nodes.get(&to)?);
    dijkstra(&graph, start, Some(goal), |_| 1usize)
        .get(&goal)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::{connected_components, is_perfect, shortest_distance, to_graph};
    use crate::model::{Direction, MazeModel, Point};

    /// Two disconnected corridors, `(0..3, 0)` and `(0..3, 2)`
    fn split_maze() -> MazeModel {
        let mut maze = MazeModel::new(3, 3).unwrap();
        for y in [0, 2] {
            for x in 0..3 {
                maze.cell_mut(Point::new(x, y)).unwrap().carve();
            }
            maze.open_passage(Point::new(0, y), Direction::Right);
            maze.open_passage(Point::new(1, y), Direction::Right);
        }
        maze
    }

    #[test]
    fn graph_follows_open_passages() {
        let maze = split_maze();
        let g = to_graph(&maze);
        assert_eq!(g.graph.node_count(), 6);
        assert_eq!(g.graph.edge_count(), 4);
        assert_eq!(connected_components(&maze), 2);
        assert!(!is_perfect(&maze));
    }

    #[test]
    fn distances_within_and_across_regions() {
        let maze = split_maze();
        assert_eq!(shortest_distance(&maze, Point::new(0, 0), Point::new(2, 0)), Some(2));
        assert_eq!(shortest_distance(&maze, Point::new(1, 2), Point::new(1, 2)), Some(0));
        assert_eq!(shortest_distance(&maze, Point::new(0, 0), Point::new(0, 2)), None);
        assert_eq!(shortest_distance(&maze, Point::new(1, 1), Point::new(0, 0)), None);
    }

    #[test]
    fn closing_a_loop_breaks_perfection() {
        let mut maze = MazeModel::new(2, 2).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                maze.cell_mut(Point::new(x, y)).unwrap().carve();
            }
        }
        maze.open_passage(Point::new(0, 0), Direction::Right);
        maze.open_passage(Point::new(0, 0), Direction::Down);
        maze.open_passage(Point::new(1, 0), Direction::Down);
        assert!(is_perfect(&maze));

        maze.open_passage(Point::new(0, 1), Direction::Right);
        assert!(!is_perfect(&maze));
        assert_eq!(connected_components(&maze), 1);
    }

    #[test]
    fn empty_grid_is_not_perfect() {
        let maze = MazeModel::new(4, 4).unwrap();
        assert!(!is_perfect(&maze));
        assert_eq!(connected_components(&maze), 0);
    }
}
