//! Plan command - route between two points and detour around cameras.

use std::sync::Arc;

use camdodge::coord::Coordinate;
use camdodge::session::{AvoidanceReport, Session, SessionConfig};
use camdodge::surface::MemoryMap;
use console::style;

use super::common::{format_route, initial_viewport, parse_address, print_cameras};
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::ui::TerminalUi;

/// Where the route starts and ends.
pub enum Endpoints {
    Coordinates(Coordinate, Coordinate),
    Addresses(String, String),
}

/// Arguments for the plan command.
pub struct PlanArgs {
    pub endpoints: Endpoints,
    pub verify_passes: Option<u32>,
    pub json: bool,
    pub verbose: bool,
}

/// Run the plan command.
pub fn run(args: PlanArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose)?;
    runner.log_startup("plan");

    let mut session_config = SessionConfig::from_config_file(runner.config());
    if let Some(passes) = args.verify_passes {
        session_config = session_config.with_verify_passes(passes);
    }

    let map = Arc::new(MemoryMap::new(initial_viewport()));
    let ui = Arc::new(TerminalUi::new("Planning route...", args.json));
    let session = Session::new(
        runner.camera_source()?,
        runner.routing_service()?,
        runner.geocoder()?,
        map.clone(),
        ui.clone(),
        session_config,
    );

    let report = match args.endpoints {
        Endpoints::Coordinates(start, end) => runner.block_on(session.set_endpoints(start, end))?,
        Endpoints::Addresses(start, end) => {
            let start = parse_address(&start)?;
            let end = parse_address(&end)?;
            runner.block_on(session.set_endpoints_by_address(&start, &end))?
        }
    };

    let Some(report) = report else {
        if args.json {
            println!("null");
        } else {
            println!("{}", style("No route found between the given points.").red());
        }
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, session.cameras().len(), &ui);
    Ok(())
}

fn print_report(report: &AvoidanceReport, cameras_in_view: usize, ui: &TerminalUi) {
    println!(
        "{} cameras in view, {} on the route",
        cameras_in_view,
        report.matches.len()
    );

    if report.is_clear() {
        println!("{}", style("The route does not pass any known camera.").green());
        return;
    }

    println!();
    print_cameras("Intersecting cameras:", &ui.flagged());

    println!();
    println!("{}", style("Detour waypoints:").bold());
    for (index, waypoint) in report.waypoints.as_slice().iter().enumerate() {
        println!("  {:>2}. {}", index + 1, waypoint);
    }

    println!();
    if report.routes.is_empty() {
        println!("{}", style("No route found with the new waypoints.").red());
        return;
    }
    println!(
        "{}",
        style(format!(
            "Recalculated routes ({} request{}):",
            report.recalculations,
            if report.recalculations == 1 { "" } else { "s" }
        ))
        .bold()
    );
    for (index, route) in report.routes.iter().enumerate() {
        println!("  {}", format_route(index, route));
    }
}
