use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use line_planner::input::{self, InputError};
use line_planner::planner::{Planner, SolveError};

#[derive(Parser)]
#[command(version, about = "Cheapest route across merged train lines")]
struct Args {
    /// Read the network from this file instead of standard input
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of line switches, overriding the input header
    #[arg(short = 's', long)]
    max_switches: Option<usize>,

    /// Print the full route, not just its cost
    #[arg(short, long)]
    route: bool,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    /// Print the merged station graph before solving
    #[arg(long)]
    show_graph: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("failed to encode route: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the answer
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let network = match &args.file {
        Some(path) => input::load(path)?,
        None => input::read(io::stdin().lock())?,
    };

    let graph = network.to_graph();
    if args.show_graph {
        print!("{graph}");
    }

    let mut config = network.solve_config();
    if args.max_switches.is_some() {
        config.max_switches = args.max_switches;
    }
    let planner = Planner::new(&graph, &config);

    if !args.route && !args.json && config.max_switches.is_none() {
        println!("{}", planner.cost()?);
        return Ok(());
    }

    let route = planner.plan()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else if args.route {
        println!("{route}");
    } else {
        println!("{}", route.cost);
    }
    Ok(())
}
