//! Ticket text parsing and number matching.
//!
//! This module provides:
//! - Draw date extraction from free-form OCR text
//! - Powerball / Mega Millions line parsing with range validation
//! - Scoring of parsed lines against an official draw
//!
//! Everything here is pure: no I/O and no shared mutable state.

pub mod date;
pub mod game;
pub mod lines;
pub mod scoring;

pub use date::extract_draw_date;
pub use game::GameKind;
pub use lines::{parse_ticket, parse_ticket_lines, ParsedTicket, TicketLine};
pub use scoring::{score_all, MatchVerdict, OfficialResult};
