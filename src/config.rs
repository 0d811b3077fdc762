use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Runtime configuration, loaded once per run from a JSON file.
///
/// The file may carry other keys; only the ones below are read.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Output directory for the note files. Prepended directly to the file
    /// names, so it is expected to end with a path separator.
    #[serde(rename = "MainFolder")]
    pub main_folder: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_main_folder() {
        let file = write_config(r#"{"MainFolder": "/tmp/notes/"}"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.main_folder, "/tmp/notes/");
    }

    #[test]
    fn ignores_unknown_keys() {
        let file = write_config(r#"{"MainFolder": "out/", "Theme": "dark"}"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.main_folder, "out/");
    }

    #[test]
    fn missing_key_is_an_error() {
        let file = write_config(r#"{"Theme": "dark"}"#);
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Path::new("/nonexistent/config.json")).is_err());
    }
}
