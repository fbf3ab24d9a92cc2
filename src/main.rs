//! Lottery Ticket Checker
//!
//! Reads a photographed Powerball or Mega Millions ticket with OCR, parses
//! its lines and draw date, and compares them with the latest official draw.

mod checker;
mod config;
mod display;
mod ocr;
mod paths;
mod results;
mod ticket;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::CheckerConfig;
use crate::ocr::{TesseractEngine, TextRecognizer};
use crate::results::{NyOpenDataClient, ResultsSource};
use crate::ticket::GameKind;

/// Logs a message to both stderr and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    let log_path = paths::get_logs_dir().join("lottery_checker.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

#[derive(Parser)]
#[command(
    name = "lottery-checker",
    version,
    about = "Check a Powerball or Mega Millions ticket against the latest draw"
)]
struct Cli {
    /// Path to config.json (defaults to the executable's directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a ticket against the latest official draw
    Check {
        #[command(flatten)]
        input: TicketInput,

        /// Game printed on the ticket ("powerball" or "mega millions")
        #[arg(short, long)]
        game: GameKind,
    },

    /// Parse ticket lines and draw date without fetching results
    Scan {
        #[command(flatten)]
        input: TicketInput,

        /// Game printed on the ticket
        #[arg(short, long)]
        game: String,
    },

    /// Print the raw OCR text of a ticket image
    Ocr {
        /// Ticket image (PNG or JPEG)
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Show the latest official draw
    Latest {
        #[arg(short, long)]
        game: GameKind,
    },

    /// Write a default config.json
    InitConfig,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct TicketInput {
    /// Ticket image (PNG or JPEG)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Text file with already recognized ticket text
    #[arg(short, long)]
    text_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let cli = Cli::parse();

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: could not create logs directory: {}", e);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(paths::get_default_config_path);

    let config = CheckerConfig::load(&config_path);

    match cli.command {
        Command::Check { input, game } => cmd_check(&config, &input, game),
        Command::Scan { input, game } => cmd_scan(&config, &input, &game),
        Command::Ocr { image } => cmd_ocr(&config, &image),
        Command::Latest { game } => cmd_latest(&config, game),
        Command::InitConfig => cmd_init_config(&config_path),
    }
}

/// Reads ticket text from a text file, or runs OCR on an image.
fn read_ticket_text(config: &CheckerConfig, input: &TicketInput) -> Result<String> {
    if let Some(path) = &input.text_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let image = input
        .image
        .as_deref()
        .context("Either --image or --text-file is required")?;
    let engine = TesseractEngine::new(config)?;
    recognize_file(&engine, image)
}

fn recognize_file(recognizer: &dyn TextRecognizer, image: &Path) -> Result<String> {
    let bytes =
        std::fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;
    log(&format!(
        "Running OCR on {} ({} bytes)",
        image.display(),
        bytes.len()
    ));
    recognizer.recognize_text(&bytes)
}

fn cmd_check(config: &CheckerConfig, input: &TicketInput, game: GameKind) -> Result<()> {
    let text = read_ticket_text(config, input)?;
    let client = NyOpenDataClient::new(config)?;

    let check = checker::check_ticket(&text, game, &client)
        .context("Failed to fetch official winning numbers")?;
    display::display_check(&check, game);
    Ok(())
}

fn cmd_scan(config: &CheckerConfig, input: &TicketInput, game_name: &str) -> Result<()> {
    let text = read_ticket_text(config, input)?;
    let parsed = ticket::parse_ticket(&text, game_name);
    display::display_scan(&parsed, game_name);
    Ok(())
}

fn cmd_ocr(config: &CheckerConfig, image: &Path) -> Result<()> {
    let engine = TesseractEngine::new(config)?;
    let text = recognize_file(&engine, image)?;
    println!("{}", text);
    Ok(())
}

fn cmd_latest(config: &CheckerConfig, game: GameKind) -> Result<()> {
    let client = NyOpenDataClient::new(config)?;
    let official = client
        .fetch_latest(game)
        .context("Failed to fetch official winning numbers")?;
    display::display_official(&official);
    Ok(())
}

fn cmd_init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }
    CheckerConfig::save_default(config_path)?;
    println!("Default config written to {}", config_path.display());
    Ok(())
}
