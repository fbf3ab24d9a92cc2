//! End-to-end ticket check: parse the ticket text, fetch the latest draw,
//! compare dates and score every line.

use chrono::NaiveDate;

use crate::results::{ResultsFetchError, ResultsSource};
use crate::ticket::{
    extract_draw_date, parse_ticket_lines, score_all, GameKind, MatchVerdict, OfficialResult,
    TicketLine,
};

/// Outcome of checking one ticket.
///
/// Only `Checked` carries verdicts; the other variants are normal negative
/// outcomes for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketCheck {
    /// No valid line for the game was found in the text
    NoLines,
    /// Lines were found but no draw date
    NoDrawDate { lines: Vec<TicketLine> },
    /// The ticket is for a different draw than the latest official one
    DateMismatch {
        ticket_date: NaiveDate,
        lines: Vec<TicketLine>,
        official: OfficialResult,
    },
    Checked {
        draw_date: NaiveDate,
        official: OfficialResult,
        lines: Vec<TicketLine>,
        verdicts: Vec<MatchVerdict>,
    },
}

/// Checks ticket text against the latest official draw for `game`.
///
/// Results are only fetched once the ticket yielded lines and a date. A fetch
/// failure is returned as an error; everything else is a [`TicketCheck`].
pub fn check_ticket(
    text: &str,
    game: GameKind,
    source: &dyn ResultsSource,
) -> Result<TicketCheck, ResultsFetchError> {
    let lines = parse_ticket_lines(text, game);
    if lines.is_empty() {
        crate::log(&format!("No valid {} lines found in ticket text", game));
        return Ok(TicketCheck::NoLines);
    }
    crate::log(&format!("Detected {} line(s) on the ticket", lines.len()));

    let Some(ticket_date) = extract_draw_date(text) else {
        crate::log("Could not detect draw date from ticket");
        return Ok(TicketCheck::NoDrawDate { lines });
    };
    crate::log(&format!("Ticket draw date: {}", ticket_date));

    let official = source.fetch_latest(game)?;

    if official.date != ticket_date {
        crate::log(&format!(
            "Ticket date {} does not match latest draw {}",
            ticket_date, official.date
        ));
        return Ok(TicketCheck::DateMismatch {
            ticket_date,
            lines,
            official,
        });
    }

    let verdicts = score_all(&lines, &official);
    let winners = verdicts.iter().filter(|v| v.is_winner).count();
    crate::log(&format!(
        "Scored {} line(s), {} winning",
        verdicts.len(),
        winners
    ));

    Ok(TicketCheck::Checked {
        draw_date: ticket_date,
        official,
        lines,
        verdicts,
    })
}
