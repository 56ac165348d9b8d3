use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors produced while fetching and interpreting solar data
#[derive(Error, Debug)]
pub enum SunsetError {
    /// The payload status is not "OK", or an expected field is missing.
    /// Carries the offending payload or the name of the missing field.
    #[error("Invalid solar service response: {0}")]
    InvalidResponse(String),

    /// Time-of-day string is not a valid 12-hour clock value
    #[error("Failed to parse time of day: {0}")]
    ParseError(String),

    /// The wall-clock time falls into a local DST gap
    #[error("Local time does not exist: {0}")]
    NonexistentLocalTime(NaiveDateTime),

    /// Error when API request fails
    #[error("API request failed: {0}")]
    ApiRequestFailed(String),

    /// Wrapper for reqwest errors
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Error when environment variable is not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Configuration value present but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
