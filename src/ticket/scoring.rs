use chrono::NaiveDate;
use std::collections::HashSet;

use super::game::GameKind;
use super::lines::TicketLine;

/// Main-number matches needed for a line to count as a winner.
///
/// A simplified rule, not the real prize table: three or more main numbers,
/// or the special ball alone, counts as a win.
pub const WINNING_MATCH_THRESHOLD: usize = 3;

/// The latest official draw for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficialResult {
    pub game: GameKind,
    pub date: NaiveDate,
    pub main_numbers: Vec<u8>,
    pub special_ball: u8,
}

/// Outcome of comparing one ticket line with the official draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchVerdict {
    pub matched_count: usize,
    pub special_matched: bool,
    pub is_winner: bool,
}

/// Scores one line. Duplicates on either side count once.
pub fn score(line: &TicketLine, official: &OfficialResult) -> MatchVerdict {
    let picked: HashSet<u8> = line.numbers.iter().copied().collect();
    let drawn: HashSet<u8> = official.main_numbers.iter().copied().collect();

    let matched_count = picked.intersection(&drawn).count();
    let special_matched = line.special == official.special_ball;

    MatchVerdict {
        matched_count,
        special_matched,
        is_winner: matched_count >= WINNING_MATCH_THRESHOLD || special_matched,
    }
}

pub fn score_all(lines: &[TicketLine], official: &OfficialResult) -> Vec<MatchVerdict> {
    lines.iter().map(|line| score(line, official)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn official(main_numbers: &[u8], special_ball: u8) -> OfficialResult {
        OfficialResult {
            game: GameKind::Powerball,
            date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            main_numbers: main_numbers.to_vec(),
            special_ball,
        }
    }

    fn line(numbers: [u8; 5], special: u8) -> TicketLine {
        TicketLine { numbers, special }
    }

    #[test]
    fn test_three_matches_wins() {
        let result = official(&[1, 2, 3, 40, 50], 9);
        let verdict = score(&line([1, 2, 3, 10, 20], 8), &result);
        assert_eq!(verdict.matched_count, 3);
        assert!(!verdict.special_matched);
        assert!(verdict.is_winner);

        let verdict = score(&line([1, 2, 3, 10, 20], 9), &result);
        assert_eq!(verdict.matched_count, 3);
        assert!(verdict.is_winner);
    }

    #[test]
    fn test_special_only_wins() {
        let result = official(&[1, 2, 3, 40, 50], 9);
        let verdict = score(&line([11, 12, 13, 14, 15], 9), &result);
        assert_eq!(verdict.matched_count, 0);
        assert!(verdict.special_matched);
        assert!(verdict.is_winner);
    }

    #[test]
    fn test_two_matches_loses() {
        let result = official(&[1, 2, 3, 40, 50], 9);
        let verdict = score(&line([1, 2, 13, 14, 15], 8), &result);
        assert_eq!(
            verdict,
            MatchVerdict {
                matched_count: 2,
                special_matched: false,
                is_winner: false
            }
        );
    }

    #[test]
    fn test_duplicates_do_not_double_count() {
        let result = official(&[5, 5, 6, 7, 8], 1);
        let verdict = score(&line([5, 5, 5, 20, 21], 2), &result);
        assert_eq!(verdict.matched_count, 1);
        assert!(!verdict.is_winner);
    }

    #[test]
    fn test_special_does_not_count_as_main_match() {
        // Special ball value appears among main numbers of the line
        let result = official(&[1, 2, 3, 4, 5], 20);
        let verdict = score(&line([20, 30, 40, 50, 60], 1), &result);
        assert_eq!(verdict.matched_count, 0);
        assert!(!verdict.special_matched);
    }

    #[test]
    fn test_score_all_keeps_order() {
        let result = official(&[1, 2, 3, 40, 50], 9);
        let lines = vec![line([1, 2, 3, 4, 5], 1), line([6, 7, 8, 10, 11], 2)];
        let verdicts = score_all(&lines, &result);
        assert_eq!(verdicts.len(), 2);
        assert!(verdicts[0].is_winner);
        assert!(!verdicts[1].is_winner);
    }
}
