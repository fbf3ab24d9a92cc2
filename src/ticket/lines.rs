use regex::Regex;
use std::sync::OnceLock;

use super::date::extract_draw_date;
use super::game::GameKind;

/// Legal range for the five main numbers (both games).
pub const MAIN_NUMBER_RANGE: std::ops::RangeInclusive<u8> = 1..=69;

/// Legal range for the Powerball / Mega Ball.
pub const SPECIAL_BALL_RANGE: std::ops::RangeInclusive<u8> = 1..=26;

/// Main numbers per line
pub const MAIN_NUMBER_COUNT: usize = 5;

static POWERBALL_LINE: OnceLock<Regex> = OnceLock::new();
static MEGA_MILLIONS_LINE: OnceLock<Regex> = OnceLock::new();

/// One play printed on a ticket: five main numbers plus the special ball.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLine {
    pub numbers: [u8; MAIN_NUMBER_COUNT],
    /// Powerball or Mega Ball, depending on the game
    pub special: u8,
}

/// Everything read from one ticket's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTicket {
    pub lines: Vec<TicketLine>,
    pub draw_date: Option<chrono::NaiveDate>,
}

/// Five two-digit groups each followed by whitespace, the marker,
/// an optional colon and whitespace, then a 1-2 digit special ball.
fn line_pattern(marker: &str) -> String {
    format!(r"((?:[0-9]{{2}}\s+){{5}}){}:?\s*([0-9]{{1,2}})", marker)
}

fn line_regex(game: GameKind) -> &'static Regex {
    let cell = match game {
        GameKind::Powerball => &POWERBALL_LINE,
        GameKind::MegaMillions => &MEGA_MILLIONS_LINE,
    };
    cell.get_or_init(|| {
        // The pattern is built from a fixed two-letter marker and always compiles
        Regex::new(&line_pattern(game.marker())).expect("ticket line pattern is valid")
    })
}

/// Extracts every valid line for `game` from OCR text, in order of appearance.
///
/// Candidates with a number outside the legal ranges are skipped; the scan
/// resumes just after the start of a skipped candidate so it cannot hide a
/// valid line that overlaps it.
pub fn parse_ticket_lines(text: &str, game: GameKind) -> Vec<TicketLine> {
    let re = line_regex(game);
    let mut lines = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        match validate_line(&caps[1], &caps[2]) {
            Some(line) => {
                lines.push(line);
                pos = whole.end();
            }
            None => {
                pos = next_char_boundary(text, whole.start());
            }
        }
    }

    lines
}

/// Parses the ticket for a game given by name.
///
/// An unrecognized game name yields no lines; the draw date is still read.
pub fn parse_ticket(text: &str, game_name: &str) -> ParsedTicket {
    let lines = match GameKind::from_name(game_name) {
        Some(game) => parse_ticket_lines(text, game),
        None => {
            crate::log(&format!(
                "Unknown game '{}', no lines parsed",
                game_name.trim()
            ));
            Vec::new()
        }
    };

    ParsedTicket {
        lines,
        draw_date: extract_draw_date(text),
    }
}

fn validate_line(number_block: &str, special: &str) -> Option<TicketLine> {
    let parsed: Vec<u8> = number_block
        .split_whitespace()
        .map(|n| n.parse::<u8>())
        .collect::<Result<_, _>>()
        .ok()?;

    let numbers: [u8; MAIN_NUMBER_COUNT] = parsed.try_into().ok()?;
    let special = special.parse::<u8>().ok()?;

    if !numbers.iter().all(|n| MAIN_NUMBER_RANGE.contains(n)) {
        return None;
    }
    if !SPECIAL_BALL_RANGE.contains(&special) {
        return None;
    }

    Some(TicketLine { numbers, special })
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    let mut next = index + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_powerball_line() {
        let lines = parse_ticket_lines("12 05 33 44 60 PB 08", GameKind::Powerball);
        assert_eq!(
            lines,
            vec![TicketLine {
                numbers: [12, 5, 33, 44, 60],
                special: 8
            }]
        );
    }

    #[test]
    fn test_out_of_range_main_number_rejected() {
        let lines = parse_ticket_lines("12 05 33 44 99 PB 08", GameKind::Powerball);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_out_of_range_special_rejected() {
        assert!(parse_ticket_lines("12 05 33 44 60 PB 27", GameKind::Powerball).is_empty());
        assert!(parse_ticket_lines("12 05 33 44 60 PB 00", GameKind::Powerball).is_empty());
        assert!(parse_ticket_lines("00 05 33 44 60 PB 08", GameKind::Powerball).is_empty());
    }

    #[test]
    fn test_two_lines_back_to_back() {
        let text = "A. 12 05 33 44 60 PB 08 B. 01 17 22 48 69 PB 26";
        let lines = parse_ticket_lines(text, GameKind::Powerball);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].numbers, [12, 5, 33, 44, 60]);
        assert_eq!(lines[0].special, 8);
        assert_eq!(lines[1].numbers, [1, 17, 22, 48, 69]);
        assert_eq!(lines[1].special, 26);
    }

    #[test]
    fn test_rejected_line_does_not_stop_scan() {
        let text = "12 05 33 44 99 PB 08 01 02 03 04 05 PB 06";
        let lines = parse_ticket_lines(text, GameKind::Powerball);
        assert_eq!(
            lines,
            vec![TicketLine {
                numbers: [1, 2, 3, 4, 5],
                special: 6
            }]
        );
    }

    #[test]
    fn test_valid_line_overlapping_rejected_candidate() {
        // "01 02 03 04 99" fails on 99, but "05 06 07 08 09" starts inside
        // that candidate's special ball text.
        let text = "01 02 03 04 99 PB 05 06 07 08 09 PB 10";
        let lines = parse_ticket_lines(text, GameKind::Powerball);
        assert_eq!(
            lines,
            vec![TicketLine {
                numbers: [5, 6, 7, 8, 9],
                special: 10
            }]
        );
    }

    #[test]
    fn test_non_ascii_digits_not_matched() {
        let text = "\u{ff11}\u{ff12} 05 33 44 61 PB 08";
        assert!(parse_ticket_lines(text, GameKind::Powerball).is_empty());
    }

    #[test]
    fn test_marker_with_colon_and_spacing() {
        let text = "10 20 30 40 50 PB:07 11 21 31 41 51 PB: 9 12 22 32 42 52 PB3";
        let lines = parse_ticket_lines(text, GameKind::Powerball);
        let specials: Vec<u8> = lines.iter().map(|l| l.special).collect();
        assert_eq!(specials, vec![7, 9, 3]);
    }

    #[test]
    fn test_mega_millions_marker() {
        let text = "03 14 25 36 47 MB 12";
        let lines = parse_ticket_lines(text, GameKind::MegaMillions);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].numbers, [3, 14, 25, 36, 47]);
        assert_eq!(lines[0].special, 12);

        // Wrong marker for the game
        assert!(parse_ticket_lines(text, GameKind::Powerball).is_empty());
    }

    #[test]
    fn test_fewer_than_five_numbers_not_matched() {
        assert!(parse_ticket_lines("05 33 44 60 PB 08", GameKind::Powerball).is_empty());
    }

    #[test]
    fn test_line_within_ocr_noise() {
        let text = "POWERBALL 06/07/2025 $2.00 QP A. 12 05 33 44 60 PB 08 \
                    POWER PLAY NO TKT 0193-22841-77";
        let lines = parse_ticket_lines(text, GameKind::Powerball);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].special, 8);
    }

    #[test]
    fn test_parse_ticket_by_name() {
        let text = "MEGA MILLIONS June 7, 2025 03 14 25 36 47 MB 12";
        let parsed = parse_ticket(text, "Mega Millions");
        assert_eq!(parsed.lines.len(), 1);
        assert_eq!(
            parsed.draw_date,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 7)
        );
    }

    #[test]
    fn test_parse_ticket_unknown_game_is_empty() {
        let text = "06/07/2025 12 05 33 44 60 PB 08";
        let parsed = parse_ticket(text, "Lucky Day Lotto");
        assert!(parsed.lines.is_empty());
        assert!(parsed.draw_date.is_some());
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_ticket_lines("", GameKind::MegaMillions).is_empty());
    }
}
