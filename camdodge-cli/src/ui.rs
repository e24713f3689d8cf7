//! Terminal UI surface.
//!
//! The loading state is an `indicatif` spinner on stderr, notifications are
//! printed in yellow and the list of flagged cameras is kept for the final
//! summary.

use std::time::Duration;

use camdodge::camera::Camera;
use camdodge::surface::UiSurface;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// [`UiSurface`] backed by the terminal.
pub struct TerminalUi {
    message: String,
    spinner: Mutex<Option<ProgressBar>>,
    flagged: Mutex<Vec<Camera>>,
    quiet: bool,
}

impl TerminalUi {
    /// Creates a UI whose spinner shows `message`.
    ///
    /// A quiet UI never draws the spinner or notifications, for machine
    /// readable output.
    pub fn new(message: impl Into<String>, quiet: bool) -> Self {
        Self {
            message: message.into(),
            spinner: Mutex::new(None),
            flagged: Mutex::new(Vec::new()),
            quiet,
        }
    }

    /// Cameras most recently reported as touching the route.
    pub fn flagged(&self) -> Vec<Camera> {
        self.flagged.lock().clone()
    }

    fn start_spinner(&self) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(self.message.clone());
        spinner.enable_steady_tick(SPINNER_TICK);
        spinner
    }
}

impl UiSurface for TerminalUi {
    fn set_loading(&self, loading: bool) {
        if self.quiet {
            return;
        }
        let mut slot = self.spinner.lock();
        match (loading, slot.take()) {
            (true, None) => *slot = Some(self.start_spinner()),
            (true, Some(existing)) => *slot = Some(existing),
            (false, Some(spinner)) => spinner.finish_and_clear(),
            (false, None) => {}
        }
    }

    fn show_cameras(&self, cameras: &[Camera]) {
        *self.flagged.lock() = cameras.to_vec();
    }

    fn notify(&self, message: &str) {
        if self.quiet {
            return;
        }
        let spinner = self.spinner.lock();
        let line = format!("{} {}", style("!").yellow().bold(), style(message).yellow());
        match spinner.as_ref() {
            Some(spinner) => spinner.println(line),
            None => eprintln!("{}", line),
        }
    }
}
