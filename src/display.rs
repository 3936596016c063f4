//! Terminal rendering of mazes and routes

use std::thread;
use std::time::Duration;

use itertools::Itertools;

use crate::model::{MazeModel, Point};

const S_WALL: char = '🟫';
const S_PATH: char = '🟩';
const S_STEP: char = '🟨';
const S_AGENT: char = '🏃';
const S_GOAL: char = '❎';

/// Draw `maze` as rows of emojis, with an optional route on top.
///
/// Route cells are highlighted; the first cell shows the agent and the last
/// cell the goal.
pub fn render(maze: &MazeModel, route: Option<&[Point]>) -> String {
    squares(maze, route)
        .iter()
        .map(|row| row.iter().join(""))
        .join("\n")
}

fn squares(maze: &MazeModel, route: Option<&[Point]>) -> Vec<Vec<char>> {
    let mut squares: Vec<Vec<char>> = (0..maze.height())
        .map(|y| {
            (0..maze.width())
                .map(|x| {
                    if maze.is_path(Point::new(x, y)) {
                        S_PATH
                    } else {
                        S_WALL
                    }
                })
                .collect()
        })
        .collect();

    if let Some(route) = route {
        for p in route.iter().filter(|p| maze.contains(**p)) {
            squares[p.y][p.x] = S_STEP;
        }
        if let Some(goal) = route.last().filter(|p| maze.contains(**p)) {
            squares[goal.y][goal.x] = S_GOAL;
        }
        if let Some(start) = route.first().filter(|p| maze.contains(**p)) {
            squares[start.y][start.x] = S_AGENT;
        }
    }
    squares
}

/// Animate an agent walking `route` on the terminal
///
/// ## Arguments
/// - `maze`: Maze to draw.
/// - `route`: Cells to walk, start and goal included.
/// - `step_ms`: Time step for each frame, milliseconds.
pub fn playback(maze: &MazeModel, route: &[Point], step_ms: usize) {
    fn print_squares(squares: &[Vec<char>]) {
        print!("\x1B[2J\x1B[1;1H");
        let sq_str = squares.iter().map(|row| row.iter().join("")).join("\n");
        println!("{}", sq_str);
    }

    if let Some(p) = route.iter().find(|p| !maze.contains(**p)) {
        log::warn!("Cannot play back route through ({}, {}) outside the maze", p.x, p.y);
        return;
    }
    let mut squares = squares(maze, None);
    if let Some(goal) = route.last() {
        squares[goal.y][goal.x] = S_GOAL;
    }

    for (i, p) in route.iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(step_ms as u64));
        }
        if let Some(prev) = i.checked_sub(1).map(|j| route[j]) {
            squares[prev.y][prev.x] = S_STEP;
        }
        squares[p.y][p.x] = S_AGENT;
        print_squares(&squares);
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::model::{Direction, MazeModel, Point};

    fn corridor() -> MazeModel {
        let mut maze = MazeModel::new(4, 2).unwrap();
        for x in 0..3 {
            maze.cell_mut(Point::new(x, 0)).unwrap().carve();
        }
        maze.open_passage(Point::new(0, 0), Direction::Right);
        maze.open_passage(Point::new(1, 0), Direction::Right);
        maze
    }

    #[test]
    fn render_plain_maze() {
        assert_eq!(render(&corridor(), None), "🟩🟩🟩🟫\n🟫🟫🟫🟫");
    }

    #[test]
    fn render_route_overlay() {
        let route = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        assert_eq!(render(&corridor(), Some(&route)), "🏃🟨❎🟫\n🟫🟫🟫🟫");
    }

    #[test]
    fn out_of_grid_route_cells_are_ignored() {
        let route = [Point::new(9, 9)];
        assert_eq!(render(&corridor(), Some(&route)), "🟩🟩🟩🟫\n🟫🟫🟫🟫");
    }
}
