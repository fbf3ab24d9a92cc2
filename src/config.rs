//! Checker configuration.
//!
//! Loads settings from config.json at startup. Provides the tesseract
//! location overrides and the official results endpoints.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete checker configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Explicit path to the tesseract executable
    #[serde(default)]
    pub tesseract_path: Option<String>,
    /// Explicit directory containing eng.traineddata
    #[serde(default)]
    pub tessdata_dir: Option<String>,
    /// Download eng.traineddata when no language data is found
    #[serde(default = "default_download_tessdata")]
    pub download_tessdata: bool,
    /// Tesseract --psm value (3 = fully automatic page segmentation)
    #[serde(default = "default_page_segmentation_mode")]
    pub page_segmentation_mode: u8,
    /// Powerball draw history resource
    #[serde(default = "default_powerball_endpoint")]
    pub powerball_endpoint: String,
    /// Mega Millions draw history resource
    #[serde(default = "default_mega_millions_endpoint")]
    pub mega_millions_endpoint: String,
    /// Timeout for results and language data downloads (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_download_tessdata() -> bool {
    true
}

fn default_page_segmentation_mode() -> u8 {
    3
}

fn default_powerball_endpoint() -> String {
    "https://data.ny.gov/resource/d6yy-54nr.json".to_string()
}

fn default_mega_millions_endpoint() -> String {
    "https://data.ny.gov/resource/5xaw-6ayf.json".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            tessdata_dir: None,
            download_tessdata: default_download_tessdata(),
            page_segmentation_mode: default_page_segmentation_mode(),
            powerball_endpoint: default_powerball_endpoint(),
            mega_millions_endpoint: default_mega_millions_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl CheckerConfig {
    /// Loads configuration from `config_path`, or returns defaults if the
    /// file is missing or unreadable.
    pub fn load(config_path: &Path) -> Self {
        crate::log(&format!("Looking for config at: {}", config_path.display()));

        if !config_path.exists() {
            crate::log("config.json not found. Using default config.");
            return Self::default();
        }

        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    config
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                    Self::default()
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
                Self::default()
            }
        }
    }

    /// Writes the default configuration as pretty JSON.
    pub fn save_default(config_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(config_path, json)
            .with_context(|| format!("Failed to write {}", config_path.display()))
    }
}
