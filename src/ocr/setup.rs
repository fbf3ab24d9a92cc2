use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::config::CheckerConfig;
use crate::log;
use crate::paths::get_tesseract_dir;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";
const LANGUAGE: &str = "eng";

#[cfg(windows)]
const EXECUTABLE_NAME: &str = "tesseract.exe";
#[cfg(not(windows))]
const EXECUTABLE_NAME: &str = "tesseract";

#[cfg(windows)]
const COMMON_EXECUTABLES: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];
#[cfg(not(windows))]
const COMMON_EXECUTABLES: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

#[cfg(windows)]
const COMMON_TESSDATA: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
];
#[cfg(not(windows))]
const COMMON_TESSDATA: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Resolved tesseract installation.
///
/// `tessdata` is `None` when the executable's built-in data directory
/// already provides the English model.
#[derive(Debug, Clone)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    pub tessdata: Option<PathBuf>,
}

/// Locates tesseract and its English language data, downloading the
/// language data if necessary and allowed.
pub fn ensure_tesseract(config: &CheckerConfig) -> Result<TesseractPaths> {
    let executable = find_tesseract_executable(config)?;
    log(&format!("Tesseract found at: {}", executable.display()));

    if let Some(tessdata) = find_tessdata_dir(config) {
        log(&format!("Using tessdata at: {}", tessdata.display()));
        return Ok(TesseractPaths {
            executable,
            tessdata: Some(tessdata),
        });
    }

    if builtin_has_language(&executable) {
        log("Using tesseract's built-in tessdata");
        return Ok(TesseractPaths {
            executable,
            tessdata: None,
        });
    }

    if !config.download_tessdata {
        return Err(anyhow!(
            "No {} language data found and downloads are disabled. \
             Set tessdata_dir in config.json or install tesseract's English data.",
            LANGUAGE
        ));
    }

    let tessdata_dir = get_tesseract_dir().join("tessdata");
    fs::create_dir_all(&tessdata_dir)
        .with_context(|| format!("Failed to create {}", tessdata_dir.display()))?;
    download_tessdata(&tessdata_dir, config.request_timeout_secs)?;

    Ok(TesseractPaths {
        executable,
        tessdata: Some(tessdata_dir),
    })
}

/// Finds the tesseract executable: config override, our local dir, PATH,
/// then common install locations.
pub fn find_tesseract_executable(config: &CheckerConfig) -> Result<PathBuf> {
    if let Some(path) = &config.tesseract_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
        log(&format!(
            "Configured tesseract_path does not exist: {}",
            p.display()
        ));
    }

    let local_exe = get_tesseract_dir().join(EXECUTABLE_NAME);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    COMMON_EXECUTABLES
        .iter()
        .map(|p| PathBuf::from(*p))
        .find(|p| p.exists())
        .ok_or_else(|| anyhow!("Tesseract not found. Please install Tesseract-OCR."))
}

/// Finds a directory containing eng.traineddata.
pub fn find_tessdata_dir(config: &CheckerConfig) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(dir) = &config.tessdata_dir {
        candidates.push(PathBuf::from(dir));
    }
    candidates.push(get_tesseract_dir().join("tessdata"));

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        candidates.push(PathBuf::from(&prefix));
        candidates.push(PathBuf::from(&prefix).join("tessdata"));
    }
    candidates.extend(COMMON_TESSDATA.iter().map(|p| PathBuf::from(*p)));

    candidates.into_iter().find(|dir| has_language_data(dir))
}

fn has_language_data(dir: &Path) -> bool {
    dir.join(format!("{}.traineddata", LANGUAGE)).exists()
}

/// Asks tesseract which languages its default data directory provides.
fn builtin_has_language(executable: &Path) -> bool {
    match Command::new(executable).arg("--list-langs").output() {
        // Some builds print the list to stderr
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            stdout
                .lines()
                .chain(stderr.lines())
                .any(|line| line.trim() == LANGUAGE)
        }
        _ => false,
    }
}

/// Downloads English trained data
fn download_tessdata(tessdata_dir: &Path, timeout_secs: u64) -> Result<()> {
    let url = format!("{}/{}.traineddata", TESSDATA_REPO, LANGUAGE);
    let target = tessdata_dir.join(format!("{}.traineddata", LANGUAGE));

    log(&format!("Downloading {}.traineddata...", LANGUAGE));

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(300)))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "lottery-ticket-checker")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}.traineddata: HTTP {}",
            LANGUAGE,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    write_traineddata(tessdata_dir, &target, &bytes)?;

    log(&format!(
        "Downloaded {}.traineddata ({} bytes)",
        LANGUAGE,
        bytes.len()
    ));

    Ok(())
}

/// Writes the model through a temp file in the same directory; `target`
/// only appears once fully written.
fn write_traineddata(tessdata_dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp = NamedTempFile::new_in(tessdata_dir)
        .with_context(|| format!("Failed to create temp file in {}", tessdata_dir.display()))?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
}
