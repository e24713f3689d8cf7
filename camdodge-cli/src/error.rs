//! CLI error types.

use std::fmt;

use camdodge::config::ConfigError;
use camdodge::coord::CoordError;
use camdodge::logging::LoggingError;
use camdodge::provider::FetchError;
use camdodge::PlannerError;

/// Errors surfaced to the user by the `camdodge` binary.
#[derive(Debug)]
pub enum CliError {
    /// Invalid configuration or command-line input.
    Config(String),

    /// Failed to read or write the configuration file.
    ConfigFile(ConfigError),

    /// Failed to set up logging.
    Logging(LoggingError),

    /// Failed to create the Tokio runtime.
    Runtime(String),

    /// A camera, routing or geocoding request failed.
    Fetch(FetchError),

    /// The planning flow failed.
    Planner(PlannerError),

    /// Failed to render output.
    Output(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::ConfigFile(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
            CliError::Fetch(e) => write!(f, "Request failed: {}", e),
            CliError::Planner(e) => write!(f, "{}", e),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::Planner(e) => Some(e),
            CliError::Config(_) | CliError::Runtime(_) | CliError::Output(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

impl From<PlannerError> for CliError {
    fn from(e: PlannerError) -> Self {
        CliError::Planner(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
