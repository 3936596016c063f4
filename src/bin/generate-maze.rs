//! CLI for maze generation

use clap::Parser;
use matrix_maze::layout::find_longest_corridor;
use matrix_maze::{display, graph, Maze, MazeConfig};

/// Maze generator for the maze shooter
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

    /// World size of one visual grid cell
    #[arg(long, default_value_t = 10.0)]
    unit_length: f64,

    /// Chance of opening each extra loop
    #[arg(long, default_value_t = 0.25)]
    cross_connections: f64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate maze, print it with statistics
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = MazeConfig {
        width: args.width,
        height: args.height,
        path_width: args.path_width,
        unit_length: args.unit_length,
        cross_connection_chance: args.cross_connections,
        ..MazeConfig::default()
    };
    let maze = Maze::build(config, args.seed)?;
    let model = maze.model();

    println!("{}", display::render(model, None));
    println!(
        "{} path cells, {} cross connections, {} region(s), perfect: {}",
        model.path_cell_count(),
        maze.cross_connections(),
        graph::connected_components(model),
        graph::is_perfect(model)
    );
    if let Some(corridor) = find_longest_corridor(model) {
        println!(
            "Longest corridor: {} cells from ({}, {}) to ({}, {})",
            corridor.length, corridor.start.x, corridor.start.y, corridor.end.x, corridor.end.y
        );
    }
    let (extent_x, extent_z) = maze.mapper().world_extent();
    println!(
        "Grid scale {}, world extent {:.1} x {:.1}",
        maze.mapper().scale(),
        extent_x,
        extent_z
    );
    Ok(())
}
