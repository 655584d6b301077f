use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors. Every variant terminates the run with a non-zero
/// exit status; spreadsheet-write failures are not represented here because
/// they are recovered by the driver (see `sink::SinkError`).
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is absent or empty. Checked before any network
    /// call is attempted.
    #[error("missing required configuration value {key}")]
    MissingConfig { key: &'static str },

    /// The token endpoint answered with a non-2xx status.
    #[error("token endpoint returned status {status}: {body}")]
    Auth { status: StatusCode, body: String },

    /// The data endpoint answered with a non-200 status. Carries the raw
    /// body and all response headers for the diagnostic dump.
    #[error("data endpoint returned status {status}: {body}")]
    Fetch {
        status: StatusCode,
        body: String,
        headers: Vec<(String, String)>,
    },

    /// Transport failure or timeout on either HTTP call.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
