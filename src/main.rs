//! CLI for maze navigation

use anyhow::{anyhow, Context};
use clap::Parser;
use matrix_maze::{display, Maze, MazeConfig, Point};

/// Shortest route between two cells of a freshly generated maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Logical maze width
    #[arg(long, default_value_t = 12)]
    width: usize,

    /// Logical maze height
    #[arg(long, default_value_t = 12)]
    height: usize,

    /// Corridor width setting, 1-10
    #[arg(long, default_value_t = 5.0)]
    path_width: f64,

    /// Chance of opening each extra loop
    #[arg(long, default_value_t = 0.25)]
    cross_connections: f64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Start cell as `x,y`; random path cell if omitted
    #[arg(long, value_parser = parse_point)]
    from: Option<Point>,

    /// Goal cell as `x,y`; random path cell if omitted
    #[arg(long, value_parser = parse_point)]
    to: Option<Point>,

    /// Display the route on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 300)]
    frame_length: usize,
}

fn parse_point(s: &str) -> anyhow::Result<Point> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected `x,y`, got `{}`", s))?;
    Ok(Point::new(
        x.trim().parse().context("Invalid x coordinate")?,
        y.trim().parse().context("Invalid y coordinate")?,
    ))
}

/// Generate maze, route between the cells, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = MazeConfig {
        width: args.width,
        height: args.height,
        path_width: args.path_width,
        cross_connection_chance: args.cross_connections,
        ..MazeConfig::default()
    };
    let mut maze = Maze::build(config, args.seed)?;

    let from = match args.from {
        Some(p) => p,
        None => maze.random_cell().context("Maze has no path cells")?,
    };
    let to = match args.to {
        Some(p) => p,
        None => maze.random_cell().context("Maze has no path cells")?,
    };

    let Some(route) = maze.route(from, to) else {
        println!(
            "No route from ({}, {}) to ({}, {}).",
            from.x, from.y, to.x, to.y
        );
        println!("{}", display::render(maze.model(), None));
        return Ok(());
    };

    if args.playback {
        display::playback(maze.model(), &route.cells, args.frame_length);
    } else {
        println!("{}", display::render(maze.model(), Some(&route.cells)));
    }
    route.print_report();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_point;
    use matrix_maze::Point;

    #[test]
    fn parse_cell_arguments() {
        assert_eq!(parse_point("3,4").unwrap(), Point::new(3, 4));
        assert_eq!(parse_point(" 10 , 0 ").unwrap(), Point::new(10, 0));
        assert!(parse_point("3").is_err());
        assert!(parse_point("-1,2").is_err());
    }
}
