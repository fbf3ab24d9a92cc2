use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::checker::TicketCheck;
use crate::ticket::{GameKind, MatchVerdict, OfficialResult, ParsedTicket, TicketLine};

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn display_official(official: &OfficialResult) {
    let mut table = new_table();
    table.set_header(vec![
        "Draw date",
        "Main numbers",
        official.game.special_label(),
    ]);
    table.add_row(vec![
        official.date.to_string(),
        format_numbers(&official.main_numbers),
        format!("{:02}", official.special_ball),
    ]);

    println!("Latest official {} draw:", official.game);
    println!("{table}");
}

pub fn display_lines(lines: &[TicketLine], game: GameKind) {
    if lines.is_empty() {
        println!("No valid {} lines found on this ticket.", game);
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Line", "Numbers", game.special_label()]);
    for (i, line) in lines.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format_numbers(&line.numbers),
            format!("{:02}", line.special),
        ]);
    }
    println!("{table}");
}

pub fn display_scan(parsed: &ParsedTicket, game_name: &str) {
    match parsed.draw_date {
        Some(date) => println!("Ticket draw date: {}", date),
        None => println!("Ticket draw date: not found"),
    }

    match GameKind::from_name(game_name) {
        Some(game) => display_lines(&parsed.lines, game),
        None => println!("Unknown game '{}': no lines parsed.", game_name),
    }
}

fn display_verdicts(lines: &[TicketLine], verdicts: &[MatchVerdict], game: GameKind) {
    let mut table = new_table();
    table.set_header(vec![
        "Line",
        "Numbers",
        game.special_label(),
        "Matched",
        "Result",
    ]);

    for (i, (line, verdict)) in lines.iter().zip(verdicts).enumerate() {
        let matched = if verdict.special_matched {
            format!("{} + special", verdict.matched_count)
        } else {
            verdict.matched_count.to_string()
        };
        let result = if verdict.is_winner {
            Cell::new("WIN").fg(Color::Green)
        } else {
            Cell::new("no win").fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format_numbers(&line.numbers)),
            Cell::new(format!("{:02}", line.special)),
            Cell::new(matched),
            result,
        ]);
    }

    println!("{table}");
}

pub fn display_check(check: &TicketCheck, game: GameKind) {
    match check {
        TicketCheck::NoLines => {
            println!("Could not find valid {} numbers on this ticket.", game);
        }
        TicketCheck::NoDrawDate { lines } => {
            display_lines(lines, game);
            println!("Could not detect the draw date. Make sure the date is clearly printed.");
        }
        TicketCheck::DateMismatch {
            ticket_date,
            lines,
            official,
        } => {
            println!("Ticket draw date: {}", ticket_date);
            display_lines(lines, game);
            display_official(official);
            println!("Ticket draw date does not match the latest official draw.");
        }
        TicketCheck::Checked {
            draw_date,
            official,
            lines,
            verdicts,
        } => {
            println!("Ticket draw date: {} (matches the latest draw)", draw_date);
            display_official(official);
            println!("Detected {} line(s) on the ticket.", lines.len());
            display_verdicts(lines, verdicts, game);
        }
    }
}
