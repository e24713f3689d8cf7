//! Cameras command - list known cameras inside a bounding box.

use camdodge::camera::Camera;
use camdodge::coord::ViewportBounds;
use camdodge::provider::CameraSource;
use serde::Serialize;

use super::common::print_cameras;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the cameras command.
pub struct CamerasArgs {
    pub bounds: ViewportBounds,
    pub json: bool,
    pub verbose: bool,
}

#[derive(Serialize)]
struct CameraListing<'a> {
    source: &'a str,
    bounds: ViewportBounds,
    count: usize,
    cameras: &'a [Camera],
}

/// Run the cameras command.
pub fn run(args: CamerasArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose)?;
    runner.log_startup("cameras");

    let source = runner.camera_source()?;
    let cameras = runner.block_on(source.fetch_cameras(&args.bounds))?;

    if args.json {
        let listing = CameraListing {
            source: source.name(),
            bounds: args.bounds,
            count: cameras.len(),
            cameras: &cameras,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print_cameras(
            &format!("{} cameras in {} ({})", cameras.len(), args.bounds, source.name()),
            &cameras,
        );
    }

    Ok(())
}
