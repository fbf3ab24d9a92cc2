use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Date layouts searched for in ticket text, in priority order.
/// Only the first occurrence of each layout is considered.
const DATE_PATTERNS: [&str; 4] = [
    r"[0-9]{2}/[0-9]{2}/[0-9]{4}",      // 06/07/2025
    r"[0-9]{2}-[0-9]{2}-[0-9]{2}",      // 06-07-25
    r"[0-9]{1,2} [A-Za-z]+ [0-9]{4}",   // 7 June 2025
    r"[A-Za-z]+ [0-9]{1,2}, [0-9]{4}",  // June 7, 2025
];

/// Formats tried on a matched substring, in order.
///
/// `%y` resolves 00-69 to 2000-2069 and 70-99 to 1970-1999.
const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%m-%d-%y", "%d %B %Y", "%B %d, %Y"];

static DATE_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();

fn date_regexes() -> &'static [Regex] {
    DATE_REGEXES.get_or_init(|| {
        DATE_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// Finds the draw date printed on a ticket.
///
/// Layouts are tried in priority order and the first one whose leftmost
/// match parses wins, even if a later layout appears earlier in the text.
/// Returns `None` when nothing date-shaped parses.
pub fn extract_draw_date(text: &str) -> Option<NaiveDate> {
    date_regexes().iter().find_map(|re| {
        let candidate = re.find(text)?.as_str();
        parse_date_candidate(candidate)
    })
}

fn parse_date_candidate(candidate: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| {
        let date = NaiveDate::parse_from_str(candidate, fmt).ok()?;
        (!fmt.contains("%B") || has_full_month_name(candidate, date)).then_some(date)
    })
}

/// chrono's `%B` also accepts abbreviations when parsing, so "Jun" must be
/// rejected here.
fn has_full_month_name(candidate: &str, date: NaiveDate) -> bool {
    let month = date.format("%B").to_string();
    candidate
        .split(|c: char| !c.is_ascii_alphabetic())
        .any(|word| word.eq_ignore_ascii_case(&month))
}
