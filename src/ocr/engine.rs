use anyhow::{anyhow, Context, Result};
use std::process::Command;
use std::time::Instant;
use tempfile::NamedTempFile;

use super::setup::{ensure_tesseract, TesseractPaths};
use super::TextRecognizer;
use crate::config::CheckerConfig;

/// A paragraph of recognized text with its mean word confidence
#[derive(Debug, Clone)]
pub struct OcrParagraph {
    pub text: String,
    pub confidence: f32,
}

/// Tesseract-backed recognizer.
///
/// Resolving the executable and language data is done once in [`TesseractEngine::new`];
/// the engine is then reused for every image.
pub struct TesseractEngine {
    paths: TesseractPaths,
    page_segmentation_mode: u8,
}

impl TesseractEngine {
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let paths = ensure_tesseract(config)?;
        Ok(Self {
            paths,
            page_segmentation_mode: config.page_segmentation_mode,
        })
    }

    /// Runs tesseract on an encoded image and returns its paragraphs.
    pub fn recognize_paragraphs(&self, image_bytes: &[u8]) -> Result<Vec<OcrParagraph>> {
        let img = image::load_from_memory(image_bytes).context("Failed to decode ticket image")?;

        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())
            .context("Failed to write temporary image")?;

        // Create temporary output file (Tesseract adds .tsv extension)
        let temp_output = NamedTempFile::new()?;
        let output_base = temp_output.path().to_string_lossy().to_string();

        let mut command = Command::new(&self.paths.executable);
        command.arg(temp_input.path()).arg(&output_base);
        if let Some(tessdata) = &self.paths.tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        let output = command
            .arg("-l")
            .arg("eng")
            .arg("--psm")
            .arg(self.page_segmentation_mode.to_string())
            .arg("tsv")
            .output()
            .context("Failed to run tesseract")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        let tsv_path = format!("{}.tsv", output_base);
        let tsv_content = std::fs::read_to_string(&tsv_path)
            .map_err(|e| anyhow!("Failed to read Tesseract output: {}", e))?;
        let _ = std::fs::remove_file(&tsv_path);

        Ok(parse_tsv_paragraphs(&tsv_content))
    }
}

impl TextRecognizer for TesseractEngine {
    fn recognize_text(&self, image_bytes: &[u8]) -> Result<String> {
        let start = Instant::now();
        let paragraphs = self.recognize_paragraphs(image_bytes)?;

        let mean_confidence = if paragraphs.is_empty() {
            0.0
        } else {
            paragraphs.iter().map(|p| p.confidence).sum::<f32>() / paragraphs.len() as f32
        };
        crate::log(&format!(
            "OCR completed in {:.2}s ({} paragraphs, conf: {:.0}%)",
            start.elapsed().as_secs_f64(),
            paragraphs.len(),
            mean_confidence
        ));

        Ok(join_paragraphs(&paragraphs))
    }
}

/// Joins paragraph texts with single spaces.
pub fn join_paragraphs(paragraphs: &[OcrParagraph]) -> String {
    paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Groups Tesseract TSV word rows into paragraphs keyed by (block, paragraph).
fn parse_tsv_paragraphs(tsv: &str) -> Vec<OcrParagraph> {
    let mut paragraphs: Vec<OcrParagraph> = Vec::new();
    let mut current_key: Option<(i32, i32)> = None;
    let mut current_words: Vec<&str> = Vec::new();
    let mut conf_sum: f32 = 0.0;

    for line in tsv.lines().skip(1) {
        // Skip header
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let level: i32 = fields[0].parse().unwrap_or(-1);
        let block_num: i32 = fields[2].parse().unwrap_or(-1);
        let par_num: i32 = fields[3].parse().unwrap_or(-1);
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);
        let text = fields[11].trim();

        // Level 5 = word
        if level != 5 || text.is_empty() || conf < 0.0 {
            continue;
        }

        let key = (block_num, par_num);
        if current_key != Some(key) {
            flush_paragraph(&mut paragraphs, &mut current_words, &mut conf_sum);
            current_key = Some(key);
        }

        current_words.push(text);
        conf_sum += conf;
    }

    flush_paragraph(&mut paragraphs, &mut current_words, &mut conf_sum);
    paragraphs
}

fn flush_paragraph(paragraphs: &mut Vec<OcrParagraph>, words: &mut Vec<&str>, conf_sum: &mut f32) {
    if !words.is_empty() {
        paragraphs.push(OcrParagraph {
            text: words.join(" "),
            confidence: *conf_sum / words.len() as f32,
        });
    }
    words.clear();
    *conf_sum = 0.0;
}
