//! JSON configuration of the command-line tools.
//!
//! - `fix`: configuration of the `perspective_fix` binary.
//! - `stages`: configuration of the `hough_stages` debugging binary.

pub mod fix;
pub mod stages;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and parse a JSON configuration file.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
