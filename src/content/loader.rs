//! Loader for the tuning and clip files at startup.

use std::fs;
use std::path::Path;

use ron::Options;

use super::data::TuningFile;
use crate::core::ClipLibrary;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

pub fn parse_tuning(file: &str, contents: &str) -> Result<TuningFile, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

pub fn parse_clips(file: &str, contents: &str) -> Result<ClipLibrary, ContentLoadError> {
    serde_json::from_str(contents).map_err(|e| ContentLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })
}

pub fn load_tuning(path: &Path) -> Result<TuningFile, ContentLoadError> {
    let contents = read_file(path)?;
    parse_tuning(&path.display().to_string(), &contents)
}

pub fn load_clips(path: &Path) -> Result<ClipLibrary, ContentLoadError> {
    let contents = read_file(path)?;
    parse_clips(&path.display().to_string(), &contents)
}
