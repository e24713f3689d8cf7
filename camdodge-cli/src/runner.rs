//! Shared setup for commands that talk to the network.

use std::future::Future;

use camdodge::config::ConfigFile;
use camdodge::logging::{self, WorkerGuard};
use camdodge::provider::{NominatimGeocoder, OsrmClient, OverpassClient, ReqwestClient};
use tokio::runtime::Runtime;

use crate::error::CliError;

/// Loads configuration, installs logging and owns the async runtime.
pub struct CliRunner {
    config: ConfigFile,
    runtime: Runtime,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Sets up a runner from the user's configuration file.
    ///
    /// `verbose` forces debug logging regardless of the configured level.
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let level = if verbose {
            "debug"
        } else {
            config.logging.level.as_str()
        };
        let log_guard = logging::init(level, config.logging.directory.as_deref())?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(e.to_string()))?;

        Ok(Self {
            config,
            runtime,
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Logs the command being run along with the library version.
    pub fn log_startup(&self, command: &str) {
        tracing::info!(
            version = camdodge::VERSION,
            command,
            osrm = %self.config.services.osrm_url,
            overpass = %self.config.services.overpass_url,
            "camdodge starting"
        );
    }

    /// Runs `future` to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn http_client(&self) -> Result<ReqwestClient, CliError> {
        Ok(ReqwestClient::with_timeout(self.config.services.timeout_secs)?)
    }

    /// Camera source for the configured Overpass endpoint.
    pub fn camera_source(&self) -> Result<OverpassClient<ReqwestClient>, CliError> {
        Ok(OverpassClient::with_endpoint(
            self.http_client()?,
            self.config.services.overpass_url.clone(),
        ))
    }

    /// Routing service for the configured OSRM server.
    pub fn routing_service(&self) -> Result<OsrmClient<ReqwestClient>, CliError> {
        Ok(OsrmClient::with_base_url(
            self.http_client()?,
            self.config.services.osrm_url.clone(),
        ))
    }

    /// Geocoder for the configured Nominatim server.
    pub fn geocoder(&self) -> Result<NominatimGeocoder<ReqwestClient>, CliError> {
        Ok(NominatimGeocoder::with_base_url(
            self.http_client()?,
            self.config.services.nominatim_url.clone(),
        ))
    }
}
