//! CamDodge CLI - Command-line interface
//!
//! Plans driving routes that steer clear of known surveillance cameras using
//! OpenStreetMap data, an OSRM routing server and Nominatim geocoding.

mod commands;
mod error;
mod runner;
mod ui;

use camdodge::coord::{parse_bounds, parse_coordinate, Coordinate, ViewportBounds};
use clap::{Args, Parser, Subcommand};

use commands::cameras::CamerasArgs;
use commands::config::ConfigCommands;
use commands::plan::{Endpoints, PlanArgs};
use error::CliError;

#[derive(Parser)]
#[command(name = "camdodge")]
#[command(version = camdodge::VERSION)]
#[command(about = "Plan driving routes around known surveillance cameras", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route between two points and detour around cameras on the way
    Plan(PlanCommand),

    /// List known cameras inside a bounding box
    Cameras {
        /// Bounding box as SOUTH,WEST,NORTH,EAST in degrees
        #[arg(long, value_parser = parse_bounds, allow_hyphen_values = true)]
        bbox: ViewportBounds,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// View or modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
struct PlanCommand {
    /// Start as LAT,LON
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true,
          required_unless_present = "from_address", conflicts_with = "from_address")]
    from: Option<Coordinate>,

    /// Destination as LAT,LON
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true,
          required_unless_present = "to_address", conflicts_with = "to_address")]
    to: Option<Coordinate>,

    /// Start as "street, city, state, postal code, country"
    #[arg(long, requires = "to_address")]
    from_address: Option<String>,

    /// Destination as "street, city, state, postal code, country"
    #[arg(long, requires = "from_address")]
    to_address: Option<String>,

    /// Re-check recalculated routes up to N times (overrides config)
    #[arg(long, value_name = "N")]
    verify_passes: Option<u32>,

    /// Print the avoidance report as JSON
    #[arg(long)]
    json: bool,
}

impl PlanCommand {
    fn endpoints(self) -> Result<Endpoints, CliError> {
        match (self.from, self.to, self.from_address, self.to_address) {
            (Some(from), Some(to), None, None) => Ok(Endpoints::Coordinates(from, to)),
            (None, None, Some(from), Some(to)) => Ok(Endpoints::Addresses(from, to)),
            _ => Err(CliError::Config(
                "Use either --from/--to or --from-address/--to-address".to_string(),
            )),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let verbose = cli.verbose;
    match cli.command {
        Commands::Plan(plan) => {
            let verify_passes = plan.verify_passes;
            let json = plan.json;
            commands::plan::run(PlanArgs {
                endpoints: plan.endpoints()?,
                verify_passes,
                json,
                verbose,
            })
        }
        Commands::Cameras { bbox, json } => commands::cameras::run(CamerasArgs {
            bounds: bbox,
            json,
            verbose,
        }),
        Commands::Config { command } => commands::config::run(command),
    }
}
