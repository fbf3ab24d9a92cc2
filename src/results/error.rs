use thiserror::Error;

use crate::ticket::GameKind;

/// Failure to obtain the latest official draw.
///
/// No ticket can be checked without the official numbers, so callers stop
/// the comparison on any of these.
#[derive(Error, Debug)]
pub enum ResultsFetchError {
    #[error("Network error while fetching official results")]
    Network(#[source] reqwest::Error),

    #[error("Results endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Failed to decode results response")]
    Decode(#[source] serde_json::Error),

    #[error("No {0} results found")]
    NoResults(GameKind),

    #[error("Results response is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid value for '{field}': {value}")]
    InvalidField { field: &'static str, value: String },
}
