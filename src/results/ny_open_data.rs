//! Latest draws from the New York State open data portal.
//!
//! Each game has its own Socrata resource; the newest row is requested with
//! `$order=draw_date DESC&$limit=1`.

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use super::error::ResultsFetchError;
use super::ResultsSource;
use crate::config::CheckerConfig;
use crate::ticket::{GameKind, OfficialResult};

/// One row of the draw history datasets. All values arrive as strings.
#[derive(Debug, Deserialize)]
struct DrawRow {
    draw_date: Option<String>,
    winning_numbers: Option<String>,
    mega_ball: Option<String>,
}

pub struct NyOpenDataClient {
    client: reqwest::blocking::Client,
    powerball_endpoint: String,
    mega_millions_endpoint: String,
}

impl NyOpenDataClient {
    pub fn new(config: &CheckerConfig) -> Result<Self, ResultsFetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("lottery-ticket-checker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ResultsFetchError::Network)?;

        Ok(Self {
            client,
            powerball_endpoint: config.powerball_endpoint.clone(),
            mega_millions_endpoint: config.mega_millions_endpoint.clone(),
        })
    }

    fn endpoint(&self, game: GameKind) -> &str {
        match game {
            GameKind::Powerball => &self.powerball_endpoint,
            GameKind::MegaMillions => &self.mega_millions_endpoint,
        }
    }
}

impl ResultsSource for NyOpenDataClient {
    fn fetch_latest(&self, game: GameKind) -> Result<OfficialResult, ResultsFetchError> {
        let url = self.endpoint(game);
        crate::log(&format!("Fetching latest {} draw from {}", game, url));

        let response = self
            .client
            .get(url)
            .query(&[("$order", "draw_date DESC"), ("$limit", "1")])
            .send()
            .map_err(ResultsFetchError::Network)?;

        if !response.status().is_success() {
            return Err(ResultsFetchError::HttpStatus(response.status().as_u16()));
        }

        let body = response.text().map_err(ResultsFetchError::Network)?;
        let result = parse_latest_draw(game, &body)?;

        crate::log(&format!(
            "Latest {} draw: {} {:?} + {}",
            game, result.date, result.main_numbers, result.special_ball
        ));

        Ok(result)
    }
}

/// Decodes the newest row of a draw history response.
///
/// Powerball rows carry six numbers in `winning_numbers` (the last is the
/// Powerball); Mega Millions rows carry five plus a separate `mega_ball`.
pub fn parse_latest_draw(game: GameKind, body: &str) -> Result<OfficialResult, ResultsFetchError> {
    let rows: Vec<DrawRow> = serde_json::from_str(body).map_err(ResultsFetchError::Decode)?;
    let row = rows
        .into_iter()
        .next()
        .ok_or(ResultsFetchError::NoResults(game))?;

    let winning = row
        .winning_numbers
        .ok_or(ResultsFetchError::MissingField("winning_numbers"))?;
    let mut numbers = parse_numbers("winning_numbers", &winning)?;

    let special_ball = match game {
        GameKind::Powerball => {
            if numbers.len() != 6 {
                return Err(ResultsFetchError::InvalidField {
                    field: "winning_numbers",
                    value: winning,
                });
            }
            numbers.pop().unwrap_or_default()
        }
        GameKind::MegaMillions => {
            let mega_ball = row
                .mega_ball
                .ok_or(ResultsFetchError::MissingField("mega_ball"))?;
            parse_number("mega_ball", &mega_ball)?
        }
    };

    if numbers.len() != 5 {
        return Err(ResultsFetchError::InvalidField {
            field: "winning_numbers",
            value: winning,
        });
    }

    let raw_date = row
        .draw_date
        .ok_or(ResultsFetchError::MissingField("draw_date"))?;
    let date = parse_draw_date(&raw_date)?;

    Ok(OfficialResult {
        game,
        date,
        main_numbers: numbers,
        special_ball,
    })
}

fn parse_numbers(field: &'static str, value: &str) -> Result<Vec<u8>, ResultsFetchError> {
    value
        .split_whitespace()
        .map(|n| parse_number(field, n))
        .collect()
}

fn parse_number(field: &'static str, value: &str) -> Result<u8, ResultsFetchError> {
    value
        .trim()
        .parse::<u8>()
        .map_err(|_| ResultsFetchError::InvalidField {
            field,
            value: value.to_string(),
        })
}

/// `draw_date` is a timestamp such as `2025-06-07T00:00:00.000`; only the
/// date part is used.
fn parse_draw_date(raw: &str) -> Result<NaiveDate, ResultsFetchError> {
    let invalid = || ResultsFetchError::InvalidField {
        field: "draw_date",
        value: raw.to_string(),
    };
    let date_part = raw.get(..10).ok_or_else(invalid)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POWERBALL_BODY: &str = r#"[{"draw_date":"2025-06-07T00:00:00.000","winning_numbers":"03 18 22 27 33 17","multiplier":"2"}]"#;
    const MEGA_MILLIONS_BODY: &str = r#"[{"draw_date":"2025-06-06T00:00:00.000","winning_numbers":"05 11 22 23 69","mega_ball":"07","multiplier":"3"}]"#;

    #[test]
    fn test_parse_powerball_row() {
        let result = parse_latest_draw(GameKind::Powerball, POWERBALL_BODY).unwrap();
        assert_eq!(result.game, GameKind::Powerball);
        assert_eq!(result.main_numbers, vec![3, 18, 22, 27, 33]);
        assert_eq!(result.special_ball, 17);
        assert_eq!(result.date.to_string(), "2025-06-07");
    }

    #[test]
    fn test_parse_mega_millions_row() {
        let result = parse_latest_draw(GameKind::MegaMillions, MEGA_MILLIONS_BODY).unwrap();
        assert_eq!(result.main_numbers, vec![5, 11, 22, 23, 69]);
        assert_eq!(result.special_ball, 7);
        assert_eq!(result.date.to_string(), "2025-06-06");
    }

    #[test]
    fn test_empty_response() {
        let err = parse_latest_draw(GameKind::Powerball, "[]").unwrap_err();
        assert!(matches!(err, ResultsFetchError::NoResults(GameKind::Powerball)));
    }

    #[test]
    fn test_missing_mega_ball() {
        let body = r#"[{"draw_date":"2025-06-06T00:00:00.000","winning_numbers":"05 11 22 23 69"}]"#;
        let err = parse_latest_draw(GameKind::MegaMillions, body).unwrap_err();
        assert!(matches!(err, ResultsFetchError::MissingField("mega_ball")));
    }

    #[test]
    fn test_missing_winning_numbers() {
        let body = r#"[{"draw_date":"2025-06-06T00:00:00.000"}]"#;
        let err = parse_latest_draw(GameKind::Powerball, body).unwrap_err();
        assert!(matches!(err, ResultsFetchError::MissingField("winning_numbers")));
    }

    #[test]
    fn test_wrong_number_count() {
        // Powerball row without the sixth number
        let body = r#"[{"draw_date":"2025-06-07T00:00:00.000","winning_numbers":"03 18 22 27 33"}]"#;
        let err = parse_latest_draw(GameKind::Powerball, body).unwrap_err();
        assert!(matches!(
            err,
            ResultsFetchError::InvalidField { field: "winning_numbers", .. }
        ));
    }

    #[test]
    fn test_bad_number_and_date() {
        let body = r#"[{"draw_date":"2025-06-07T00:00:00.000","winning_numbers":"03 18 xx 27 33 17"}]"#;
        assert!(parse_latest_draw(GameKind::Powerball, body).is_err());

        let body = r#"[{"draw_date":"June 7","winning_numbers":"03 18 22 27 33 17"}]"#;
        let err = parse_latest_draw(GameKind::Powerball, body).unwrap_err();
        assert!(matches!(
            err,
            ResultsFetchError::InvalidField { field: "draw_date", .. }
        ));
    }

    #[test]
    fn test_not_json() {
        let err = parse_latest_draw(GameKind::Powerball, "<html>").unwrap_err();
        assert!(matches!(err, ResultsFetchError::Decode(_)));
    }
}
