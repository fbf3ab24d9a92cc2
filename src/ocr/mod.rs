pub mod engine;
pub mod setup;

pub use engine::TesseractEngine;

use anyhow::Result;

/// Turns an encoded ticket image into text.
///
/// Implementations return paragraph-level text joined with single spaces.
pub trait TextRecognizer {
    fn recognize_text(&self, image_bytes: &[u8]) -> Result<String>;
}
