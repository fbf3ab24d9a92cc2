//! Official winning numbers.
//!
//! The checker only depends on [`ResultsSource`]; the NY open data client is
//! the production implementation.

pub mod error;
pub mod ny_open_data;

pub use error::ResultsFetchError;
pub use ny_open_data::NyOpenDataClient;

use crate::ticket::{GameKind, OfficialResult};

/// Provides the most recent official draw for a game.
pub trait ResultsSource {
    fn fetch_latest(&self, game: GameKind) -> Result<OfficialResult, ResultsFetchError>;
}
