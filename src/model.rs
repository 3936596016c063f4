//! Logical maze grid

use anyhow::ensure;

/// Location in the logical grid
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`
    pub fn manhattan(&self, other: &Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Axis-aligned movement direction; `Up` decreases `y`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in north, south, west, east order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid delta `(dx, dy)` of one step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Wall flags of a cell; `true` blocks movement out of the cell.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }
}

impl Walls {
    pub fn has(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, dir: Direction, present: bool) {
        match dir {
            Direction::Up => self.top = present,
            Direction::Down => self.bottom = present,
            Direction::Left => self.left = present,
            Direction::Right => self.right = present,
        }
    }
}

/// One logical grid unit
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub walls: Walls,
    /// Generation-time flag; meaningless once generation has finished
    pub visited: bool,
    pub is_wall: bool,
    pub is_path: bool,
}

impl Cell {
    fn blank(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            walls: Walls::default(),
            visited: false,
            is_wall: true,
            is_path: false,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Turn the cell into a traversable path cell
    pub fn carve(&mut self) {
        self.is_wall = false;
        self.is_path = true;
    }
}

/// Logical maze: `height` rows of `width` cells, stored row-major.
#[derive(Clone, Debug)]
pub struct MazeModel {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl MazeModel {
    /// Allocate a fully walled, unvisited grid.
    ///
    /// Returns error for zero dimensions.
    pub fn new(width: usize, height: usize) -> anyhow::Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "Maze dimensions must be positive, got {}x{}",
            width,
            height
        );
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::blank(x, y)))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Restore every cell to its freshly allocated state.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::blank(cell.x, cell.y);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, `width * height`
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Flat index `y * width + x`, if `p` is inside the grid
    pub fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| p.y * self.width + p.x)
    }

    /// Point at flat index `idx`
    pub fn point_at(&self, idx: usize) -> Point {
        Point::new(idx % self.width, idx / self.width)
    }

    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|idx| &self.cells[idx])
    }

    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index(p).map(move |idx| &mut self.cells[idx])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn is_path(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| c.is_path)
    }

    /// Neighbour one step away in `dir`, if inside the grid
    pub fn step(&self, p: Point, dir: Direction) -> Option<Point> {
        self.step_by(p, dir, 1)
    }

    /// Cell `distance` steps away in `dir`, if inside the grid
    pub fn step_by(&self, p: Point, dir: Direction, distance: usize) -> Option<Point> {
        let (dx, dy) = dir.delta();
        let x = p.x.checked_add_signed(dx * distance as isize)?;
        let y = p.y.checked_add_signed(dy * distance as isize)?;
        let next = Point::new(x, y);
        self.contains(next).then_some(next)
    }

    /// Whether an agent standing on `p` may move one step in `dir`.
    ///
    /// Only the wall of the current cell is consulted; the neighbour must be
    /// a path cell.
    pub fn is_open(&self, p: Point, dir: Direction) -> bool {
        let Some(cell) = self.cell(p) else {
            return false;
        };
        !cell.walls.has(dir) && self.step(p, dir).is_some_and(|n| self.is_path(n))
    }

    /// Clear the wall pair between `p` and its neighbour in `dir`.
    ///
    /// Returns `false` when the neighbour lies outside the grid.
    pub fn open_passage(&mut self, p: Point, dir: Direction) -> bool {
        let Some(next) = self.step(p, dir) else {
            return false;
        };
        if let Some(cell) = self.cell_mut(p) {
            cell.walls.set(dir, false);
        }
        if let Some(cell) = self.cell_mut(next) {
            cell.walls.set(dir.opposite(), false);
        }
        true
    }

    /// Coordinates of all path cells, row-major
    pub fn path_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().filter(|c| c.is_path).map(Cell::point)
    }

    pub fn path_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_path).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, MazeModel, Point};

    #[test]
    fn new_grid_is_fully_walled() {
        let maze = MazeModel::new(4, 3).unwrap();
        assert_eq!(maze.len(), 12);
        for (idx, cell) in maze.cells().enumerate() {
            assert_eq!(maze.point_at(idx), cell.point());
            assert!(cell.is_wall);
            assert!(!cell.is_path);
            assert!(!cell.visited);
            assert!(Direction::ALL.iter().all(|&d| cell.walls.has(d)));
        }
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(MazeModel::new(0, 5).is_err());
        assert!(MazeModel::new(5, 0).is_err());
    }

    #[test]
    fn reset_clears_stale_flags() {
        let mut maze = MazeModel::new(3, 3).unwrap();
        let p = Point::new(1, 1);
        let cell = maze.cell_mut(p).unwrap();
        cell.carve();
        cell.visited = true;
        maze.open_passage(p, Direction::Up);

        maze.reset();

        let fresh = MazeModel::new(3, 3).unwrap();
        assert!(maze.cells().eq(fresh.cells()));
    }

    #[test]
    fn step_stays_inside_grid() {
        let maze = MazeModel::new(3, 2).unwrap();
        let corner = Point::new(0, 0);
        assert_eq!(maze.step(corner, Direction::Up), None);
        assert_eq!(maze.step(corner, Direction::Left), None);
        assert_eq!(maze.step(corner, Direction::Right), Some(Point::new(1, 0)));
        assert_eq!(maze.step_by(corner, Direction::Right, 2), Some(Point::new(2, 0)));
        assert_eq!(maze.step_by(corner, Direction::Down, 2), None);
    }

    #[test]
    fn open_passage_is_symmetric() {
        let mut maze = MazeModel::new(2, 2).unwrap();
        let a = Point::new(0, 0);
        assert!(maze.open_passage(a, Direction::Down));
        assert!(!maze.cell(a).unwrap().walls.bottom);
        assert!(!maze.cell(Point::new(0, 1)).unwrap().walls.top);
        assert!(!maze.open_passage(a, Direction::Left));
    }

    #[test]
    fn movement_requires_open_wall_and_path_neighbour() {
        let mut maze = MazeModel::new(2, 1).unwrap();
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        maze.cell_mut(a).unwrap().carve();
        maze.cell_mut(b).unwrap().carve();
        assert!(!maze.is_open(a, Direction::Right));

        maze.open_passage(a, Direction::Right);
        assert!(maze.is_open(a, Direction::Right));
        assert!(maze.is_open(b, Direction::Left));

        maze.cell_mut(b).unwrap().is_path = false;
        assert!(!maze.is_open(a, Direction::Right));
    }
}
